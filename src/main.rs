use anyhow::{Context, Result};
use quiz_question_submit::{logger, App, Config};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::from_env().context("加载配置失败")?;

    // 初始化日志
    logger::init(config.verbose_logging);

    // 路由序号：命令行参数优先
    let ordinal = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("QUESTION_ORDINAL").ok())
        .unwrap_or_else(|| "1".to_string());

    // 初始化并运行应用
    App::initialize(config, ordinal)
        .await
        .context("初始化失败")?
        .run()
        .await?;

    Ok(())
}

use crate::clients::{HttpQuestionClient, QuestionApi};
use crate::config::Config;
use crate::error::{AppResult, BusinessError};
use crate::models::{load_catalog, Question, QuestionInfo};
use crate::services::{
    fetch_detail, send_submission, DetailTicket, LoggingTypingHandler, SubmissionRequest,
    SubmitOutcome, TypingHandler,
};
use crate::utils::logging::{log_screen, log_startup, log_submit_outcome};
use crate::workflow::{Navigator, QuestionCtx, QuestionFlow, RecordingNavigator, Screen};
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// 事件循环中的事件
#[derive(Debug)]
pub enum AppEvent {
    /// 详情请求结束
    DetailLoaded {
        ticket: DetailTicket,
        result: AppResult<QuestionInfo>,
    },
    /// 提交请求结束
    SubmitFinished(AppResult<()>),
    /// 题目列表重新拉取结束
    CatalogLoaded(AppResult<Vec<Question>>),
    /// 用户输入一行
    Input(String),
    /// 输入结束
    InputClosed,
}

/// 用户输入的命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Back,
    Goto(String),
    Retry,
    Refresh,
    Answer(String),
    /// 以 `:` 开头但无法识别，不会作为答案提交
    Invalid(String),
}

impl Command {
    /// 解析一行输入
    ///
    /// 以 `:` 开头的一律按命令处理，其余内容原样作为答案
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if !trimmed.starts_with(':') {
            return Command::Answer(line.to_string());
        }

        let (name, arg) = match trimmed.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (trimmed, ""),
        };
        match (name, arg) {
            (":back", "") => Command::Back,
            (":retry", "") => Command::Retry,
            (":refresh", "") => Command::Refresh,
            (":goto", ordinal) if !ordinal.is_empty() => Command::Goto(ordinal.to_string()),
            _ => Command::Invalid(trimmed.to_string()),
        }
    }
}

/// 应用主结构
pub struct App {
    api: Arc<dyn QuestionApi>,
    catalog: Vec<Question>,
    flow: QuestionFlow,
    navigator: RecordingNavigator,
    typing: LoggingTypingHandler,
    tx: mpsc::UnboundedSender<AppEvent>,
    rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config, ordinal: String) -> AppResult<Self> {
        log_startup(&config, &ordinal);

        let user_token = config.require_token()?.to_string();
        let api: Arc<dyn QuestionApi> = Arc::new(HttpQuestionClient::new(&config)?);

        let catalog = match &config.catalog_file {
            Some(path) => load_catalog(Path::new(path)).await?,
            None => {
                info!("📁 正在从服务端拉取题目列表...");
                api.list_questions(&user_token).await?
            }
        };
        if catalog.is_empty() {
            return Err(BusinessError::EmptyCatalog.into());
        }
        info!("✓ 共 {} 道题目", catalog.len());

        Ok(Self::with_api(
            api,
            catalog,
            QuestionCtx::from_config(&config, ordinal),
        ))
    }

    /// 使用现成的客户端和题目列表创建
    pub fn with_api(api: Arc<dyn QuestionApi>, catalog: Vec<Question>, ctx: QuestionCtx) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            api,
            catalog,
            flow: QuestionFlow::new(ctx),
            navigator: RecordingNavigator::default(),
            typing: LoggingTypingHandler::default(),
            tx,
            rx,
        }
    }

    /// 运行事件循环，直到离开当前题目
    pub async fn run(mut self) -> AppResult<()> {
        self.spawn_stdin_reader();
        self.sync_catalog();
        if matches!(self.flow.screen(), Screen::NotFound) {
            return Err(BusinessError::QuestionNotFound {
                ordinal: self.flow.ctx().ordinal.clone(),
            }
            .into());
        }

        while let Some(event) = self.rx.recv().await {
            if !self.handle_event(event) {
                break;
            }
        }

        info!("👋 已离开 {}", self.flow.ctx());
        Ok(())
    }

    /// 处理一个事件，返回 false 表示离开当前题目
    fn handle_event(&mut self, event: AppEvent) -> bool {
        match event {
            AppEvent::DetailLoaded { ticket, result } => {
                if !self.flow.apply_detail(&ticket, result) {
                    return true;
                }
                self.render()
            }
            AppEvent::SubmitFinished(result) => {
                let outcome = self.flow.finish_submit(result, &mut self.navigator);
                log_submit_outcome(&outcome);
                outcome != SubmitOutcome::Accepted
            }
            AppEvent::CatalogLoaded(Ok(catalog)) => {
                self.catalog = catalog;
                self.sync_catalog();
                true
            }
            AppEvent::CatalogLoaded(Err(e)) => {
                warn!("⚠️ 题目列表刷新失败: {}", e);
                true
            }
            AppEvent::Input(line) => self.handle_command(Command::parse(&line)),
            AppEvent::InputClosed => false,
        }
    }

    fn handle_command(&mut self, command: Command) -> bool {
        match command {
            Command::Back => {
                self.navigator.go_back();
                return false;
            }
            Command::Goto(ordinal) => {
                if let Some(ticket) = self.flow.navigate(ordinal, &self.catalog) {
                    self.spawn_fetch(ticket);
                }
                return self.render();
            }
            Command::Retry => match self.flow.retry_detail() {
                Some(ticket) => self.spawn_fetch(ticket),
                None => info!("当前没有需要重试的请求"),
            },
            Command::Refresh => self.spawn_catalog_reload(),
            Command::Answer(answer) => match self.flow.begin_submit(&answer) {
                Ok(request) => self.spawn_submit(request),
                Err(rejection) => log_submit_outcome(&SubmitOutcome::Rejected(rejection)),
            },
            Command::Invalid(input) => {
                warn!("⚠️ 无效命令: {}", input);
                info!("可用命令: :back | :goto <序号> | :retry | :refresh");
            }
        }
        true
    }

    /// 重新定位，换题时发出详情请求
    fn sync_catalog(&mut self) {
        if let Some(ticket) = self.flow.refresh(&self.catalog) {
            self.spawn_fetch(ticket);
        }
        self.render();
    }

    /// 输出画面，打字题交给打字组件后返回 false
    fn render(&mut self) -> bool {
        let screen = self.flow.screen();
        log_screen(&screen);
        if let Screen::Alternate(handoff) = screen {
            self.typing.take_over(&handoff);
            return false;
        }
        true
    }

    fn spawn_fetch(&self, ticket: DetailTicket) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        let user_token = self.flow.ctx().user_token.clone();
        tokio::spawn(async move {
            let result = fetch_detail(api.as_ref(), &ticket, &user_token).await;
            let _ = tx.send(AppEvent::DetailLoaded { ticket, result });
        });
    }

    fn spawn_submit(&self, request: SubmissionRequest) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = send_submission(api.as_ref(), &request).await;
            let _ = tx.send(AppEvent::SubmitFinished(result));
        });
    }

    fn spawn_catalog_reload(&self) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        let user_token = self.flow.ctx().user_token.clone();
        tokio::spawn(async move {
            let result = api.list_questions(&user_token).await;
            let _ = tx.send(AppEvent::CatalogLoaded(result));
        });
    }

    fn spawn_stdin_reader(&self) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        if tx.send(AppEvent::Input(line)).is_err() {
                            break;
                        }
                    }
                    Ok(None) => {
                        let _ = tx.send(AppEvent::InputClosed);
                        break;
                    }
                    Err(e) => {
                        debug!("读取输入失败: {}", e);
                        let _ = tx.send(AppEvent::InputClosed);
                        break;
                    }
                }
            }
        });
    }
}

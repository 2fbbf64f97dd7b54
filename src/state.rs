use crate::config::Settings;
use crate::session::UploadSession;
use tokio::sync::broadcast;

#[derive(Clone)]
pub struct AppState {
    pub session: UploadSession,
    pub settings: Settings,
    pub host_url: String,
    pub tx: broadcast::Sender<String>,
}

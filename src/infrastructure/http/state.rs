use std::sync::Arc;

use crate::application::chat::{ChatContext, ChatService};
use crate::application::messaging::RateLimiter;
use crate::application::services::{AlertService, CommunityService, ReminderService, TipsService};
use crate::application::sms::SmsService;
use crate::application::ussd::{UssdService, UssdSession};
use crate::application::voice::VoiceService;
use crate::domain::traits::{Gateway, Store};
use crate::infrastructure::config::Config;
use crate::infrastructure::llm::LLM;
use crate::infrastructure::session::SessionStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub ussd: Arc<UssdService>,
    pub sms: Arc<SmsService>,
    pub voice: Arc<VoiceService>,
    pub chat: Arc<ChatService>,
    pub alerts: Arc<AlertService>,
    pub reminders: Arc<ReminderService>,
    pub tips: Arc<TipsService>,
    pub community: Arc<CommunityService>,
    pub rate_limiter: Arc<RateLimiter>,
    pub ussd_sessions: SessionStore<UssdSession>,
    pub chat_sessions: SessionStore<ChatContext>,
    pub version: &'static str,
}

impl AppState {
    pub fn new(
        config: &Config,
        store: Arc<dyn Store>,
        gateway: Arc<dyn Gateway>,
        llm: Option<Arc<dyn LLM>>,
    ) -> Self {
        let ttl = config.session.ttl();
        let ussd_sessions = SessionStore::new(ttl);
        let chat_sessions = SessionStore::new(ttl);
        let limits = &config.security.rate_limit;

        Self {
            ussd: Arc::new(UssdService::new(
                ussd_sessions.clone(),
                store.clone(),
                gateway.clone(),
            )),
            sms: Arc::new(SmsService::new(store.clone(), gateway.clone())),
            voice: Arc::new(VoiceService::new(config.voice.clone())),
            chat: Arc::new(ChatService::new(chat_sessions.clone())),
            alerts: Arc::new(AlertService::new(store.clone(), gateway.clone())),
            reminders: Arc::new(ReminderService::new(store.clone(), gateway)),
            tips: Arc::new(TipsService::new(
                llm,
                config.llm.temperature,
                config.llm.max_tokens,
            )),
            community: Arc::new(CommunityService::new(store)),
            rate_limiter: Arc::new(RateLimiter::new(limits.max_requests, limits.window_seconds)),
            ussd_sessions,
            chat_sessions,
            version: env!("CARGO_PKG_VERSION"),
        }
    }

    /// Drop expired sessions and idle rate-limit windows
    pub fn cleanup(&self) -> usize {
        let removed = self.ussd_sessions.cleanup_expired() + self.chat_sessions.cleanup_expired();
        self.rate_limiter.prune();
        tracing::debug!("Rate limiter tracking {} key(s)", self.rate_limiter.tracked());
        removed
    }
}

//! ProcessTurn - the Turn Orchestrator.
//!
//! Runs one exchange end to end:
//!
//! ```text
//! RECEIVED → SANITIZED → (TRANSLATED_IN | SKIPPED_IN) → ASSEMBLED → DISPATCHED
//!          → (COMPLETED | DEGRADED | FAILED) → (TRANSLATED_OUT | SKIPPED_OUT) → RESPONDED
//! ```
//!
//! The handler never returns an error. Every failure becomes one of the
//! fixed [`UserNotice`] texts; the underlying detail is only logged.

use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

use super::turn_locks::TurnLocks;
use crate::domain::dialog::{
    is_degraded_html, PromptAssembler, TurnFields, TurnRequest, TurnText,
};
use crate::domain::foundation::{ConversationKey, TenantId};
use crate::domain::language::{select_outbound_target, LanguageTag, OutboundTranslation};
use crate::domain::text::InputLimits;
use crate::ports::{CompletionGateway, TranscriptStore, TranslationBridge, TranslationRequest};

/// Literal completion the backend sends when it wants the caller to back off.
const ERROR_SENTINEL: &str = "error";

/// Command to process one chat turn.
#[derive(Debug, Clone)]
pub struct ProcessTurnCommand {
    pub tenant: TenantId,
    pub fields: TurnFields,
}

/// Stages a turn passes through, recorded in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnStage {
    Received,
    Sanitized,
    TranslatedIn,
    SkippedIn,
    Assembled,
    Dispatched,
    Completed,
    Degraded,
    Failed,
    TranslatedOut,
    SkippedOut,
    Responded,
}

/// Why a turn produced a notice instead of a completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegradedReason {
    /// The backend returned an HTML error page.
    HtmlPayload,
    /// The backend returned the literal `error` token.
    ErrorSentinel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    InvalidInput,
    Translation,
    Store,
    Gateway,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    Completed,
    Degraded(DegradedReason),
    Failed(FailureReason),
}

/// Fixed texts returned in place of a completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserNotice {
    ModelUnavailable,
    TemporaryError,
    TranslationError,
    StoreError,
    RejectedInput,
}

impl UserNotice {
    pub const DEFAULT_MODEL_UNAVAILABLE: &'static str =
        "The AI model is currently unavailable. Please try again later.";
    pub const TEMPORARY_ERROR: &'static str = "Temporary error, please try again in 30 seconds.";
    pub const TRANSLATION_ERROR: &'static str = "Translation error. Please try again later.";
    pub const STORE_ERROR: &'static str = "Database error. Please try again later.";
    pub const REJECTED_INPUT: &'static str =
        "Your message could not be processed. Please check it and try again.";
}

/// Reply of a processed turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessTurnResult {
    /// Resolved user id, or the raw one when it was rejected.
    pub user_id: String,
    pub reply: String,
    pub outcome: TurnOutcome,
}

/// Handler sequencing sanitize, translate, assemble, dispatch and persist.
pub struct ProcessTurnHandler {
    store: Arc<dyn TranscriptStore>,
    gateway: Arc<dyn CompletionGateway>,
    translator: Arc<dyn TranslationBridge>,
    assembler: PromptAssembler,
    limits: InputLimits,
    unavailable_message: String,
    locks: Option<TurnLocks>,
}

impl ProcessTurnHandler {
    pub fn new(
        store: Arc<dyn TranscriptStore>,
        gateway: Arc<dyn CompletionGateway>,
        translator: Arc<dyn TranslationBridge>,
        assembler: PromptAssembler,
        limits: InputLimits,
    ) -> Self {
        Self {
            store,
            gateway,
            translator,
            assembler,
            limits,
            unavailable_message: UserNotice::DEFAULT_MODEL_UNAVAILABLE.to_string(),
            locks: None,
        }
    }

    /// Overrides the text shown when the model is unavailable.
    pub fn with_unavailable_message(mut self, message: impl Into<String>) -> Self {
        self.unavailable_message = message.into();
        self
    }

    /// Serializes turns of the same (tenant, user) from transcript load to persist.
    pub fn with_turn_serialization(mut self, enabled: bool) -> Self {
        self.locks = enabled.then(TurnLocks::new);
        self
    }

    fn notice(&self, notice: UserNotice) -> String {
        match notice {
            UserNotice::ModelUnavailable => self.unavailable_message.clone(),
            UserNotice::TemporaryError => UserNotice::TEMPORARY_ERROR.to_string(),
            UserNotice::TranslationError => UserNotice::TRANSLATION_ERROR.to_string(),
            UserNotice::StoreError => UserNotice::STORE_ERROR.to_string(),
            UserNotice::RejectedInput => UserNotice::REJECTED_INPUT.to_string(),
        }
    }

    fn fail(&self, user_id: String, reason: FailureReason, notice: UserNotice) -> ProcessTurnResult {
        tracing::debug!(stage = ?TurnStage::Failed, ?reason);
        ProcessTurnResult {
            user_id,
            reply: self.notice(notice),
            outcome: TurnOutcome::Failed(reason),
        }
    }

    pub async fn handle(&self, cmd: ProcessTurnCommand) -> ProcessTurnResult {
        let span = tracing::info_span!("turn", turn_id = %Uuid::new_v4(), tenant = %cmd.tenant);
        self.run(cmd).instrument(span).await
    }

    async fn run(&self, cmd: ProcessTurnCommand) -> ProcessTurnResult {
        tracing::debug!(stage = ?TurnStage::Received);
        let raw_user_id = cmd.fields.user_id.clone().unwrap_or_default();

        // 1. Sanitize and resolve languages
        let request = match TurnRequest::from_fields(cmd.fields, &self.limits) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(error = %e, "Rejected turn input");
                return self.fail(raw_user_id, FailureReason::InvalidInput, UserNotice::RejectedInput);
            }
        };
        let user_id = request.user_id.to_string();
        tracing::debug!(
            stage = ?TurnStage::Sanitized,
            user = %request.user_id,
            from = %request.translate_from,
            to = %request.translate_to,
        );

        // 2. Translate the message into the pivot language
        let (message, detected) = if request.translate_from.is_pivot() || request.message.is_empty() {
            tracing::debug!(stage = ?TurnStage::SkippedIn);
            (request.message.clone(), request.translate_from)
        } else {
            let inbound = TranslationRequest::new(
                LanguageTag::PIVOT,
                request.message.clone(),
                request.translate_from,
            );
            match self.translator.translate(inbound).await {
                Ok(translation) => {
                    tracing::debug!(
                        stage = ?TurnStage::TranslatedIn,
                        detected = %translation.detected_source_language,
                    );
                    (translation.translated_text, translation.detected_source_language)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Inbound translation failed");
                    return self.fail(user_id, FailureReason::Translation, UserNotice::TranslationError);
                }
            }
        };

        let key = ConversationKey::new(cmd.tenant, request.user_id.clone());
        let guard = match &self.locks {
            Some(locks) => Some(locks.acquire(&key).await),
            None => None,
        };

        // 3. Provision the user and load history
        let old_transcript = match self.load_history(&key).await {
            Ok(transcript) => transcript,
            Err(reason) => {
                return self.fail(user_id, reason, UserNotice::StoreError);
            }
        };

        // 4. Assemble
        let prompt = self.assembler.assemble(&TurnText {
            old_transcript: &old_transcript,
            situation: &request.situation,
            from_name: &request.from_name,
            to_name: &request.to_name,
            message: &message,
        });
        tracing::debug!(
            stage = ?TurnStage::Assembled,
            update_chars = prompt.transcript_update.chars().count(),
            input_chars = prompt.model_input.chars().count(),
        );

        // 5. Dispatch
        let completion = match self.gateway.complete(&prompt.model_input).await {
            Ok(completion) => completion,
            Err(e) => {
                tracing::error!(error = %e, kind = e.kind(), "Completion backend failed");
                return self.fail(user_id, FailureReason::Gateway, UserNotice::ModelUnavailable);
            }
        };
        tracing::debug!(stage = ?TurnStage::Dispatched, completion_chars = completion.chars().count());

        // 6. Detect degraded payloads
        if completion.trim() == ERROR_SENTINEL {
            tracing::warn!(stage = ?TurnStage::Degraded, "Completion backend asked to retry");
            return ProcessTurnResult {
                user_id,
                reply: self.notice(UserNotice::TemporaryError),
                outcome: TurnOutcome::Degraded(DegradedReason::ErrorSentinel),
            };
        }
        let degraded = is_degraded_html(&completion);
        let completion = if degraded {
            tracing::warn!(stage = ?TurnStage::Degraded, "Completion backend returned an HTML page");
            self.notice(UserNotice::ModelUnavailable)
        } else {
            tracing::debug!(stage = ?TurnStage::Completed);
            completion
        };

        // 7. Persist
        let stored = self.assembler.finalize(&prompt.transcript_update, &completion);
        if let Err(e) = self.store.put(&key.tenant, &key.user, &stored).await {
            tracing::error!(error = %e, "Failed to save transcript");
            return self.fail(user_id, FailureReason::Store, UserNotice::StoreError);
        }
        drop(guard);

        if degraded {
            return ProcessTurnResult {
                user_id,
                reply: completion,
                outcome: TurnOutcome::Degraded(DegradedReason::HtmlPayload),
            };
        }

        // 8. Translate the completion back
        let reply = match select_outbound_target(request.translate_to, request.translate_from, detected) {
            OutboundTranslation::Skip => {
                tracing::debug!(stage = ?TurnStage::SkippedOut);
                completion
            }
            OutboundTranslation::To(target) => {
                let outbound = TranslationRequest::new(target, completion, LanguageTag::PIVOT);
                match self.translator.translate(outbound).await {
                    Ok(translation) => {
                        tracing::debug!(stage = ?TurnStage::TranslatedOut, target = %target);
                        translation.translated_text
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Outbound translation failed");
                        return self.fail(user_id, FailureReason::Translation, UserNotice::TranslationError);
                    }
                }
            }
        };

        tracing::info!(stage = ?TurnStage::Responded, user = %user_id, "Turn completed");
        ProcessTurnResult {
            user_id,
            reply,
            outcome: TurnOutcome::Completed,
        }
    }

    async fn load_history(&self, key: &ConversationKey) -> Result<String, FailureReason> {
        let created = self.store.create(&key.tenant, &key.user).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to provision user");
            FailureReason::Store
        })?;
        if created {
            tracing::info!(user = %key.user, "Provisioned new user");
        }

        let transcript = self.store.get(&key.tenant, &key.user).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to load transcript");
            FailureReason::Store
        })?;
        Ok(transcript.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryTranscriptStore;
    use crate::adapters::model::MockCompletionGateway;
    use crate::adapters::translation::MockTranslationBridge;
    use crate::domain::dialog::{ConversationRecord, PromptBudget};
    use crate::domain::foundation::UserId;
    use crate::domain::language::resolve;
    use crate::ports::{GatewayError, StoreError, TranslationError};
    use async_trait::async_trait;
    use std::time::Duration;

    struct Harness {
        store: InMemoryTranscriptStore,
        gateway: MockCompletionGateway,
        translator: MockTranslationBridge,
        handler: ProcessTurnHandler,
    }

    fn harness(gateway: MockCompletionGateway, translator: MockTranslationBridge) -> Harness {
        let store = InMemoryTranscriptStore::new();
        let handler = ProcessTurnHandler::new(
            Arc::new(store.clone()),
            Arc::new(gateway.clone()),
            Arc::new(translator.clone()),
            PromptAssembler::new(PromptBudget::default(), "Romance"),
            InputLimits::default(),
        );
        Harness {
            store,
            gateway,
            translator,
            handler,
        }
    }

    fn tenant() -> TenantId {
        TenantId::new("acme").unwrap()
    }

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn command(fields: TurnFields) -> ProcessTurnCommand {
        ProcessTurnCommand {
            tenant: tenant(),
            fields,
        }
    }

    fn english_turn(user_id: &str, from: &str, message: &str) -> TurnFields {
        TurnFields {
            user_id: Some(user_id.to_string()),
            message: Some(message.to_string()),
            from_name: Some(from.to_string()),
            translate_from: Some("en".to_string()),
            ..Default::default()
        }
    }

    async fn stored(store: &InMemoryTranscriptStore, user_id: &str) -> Option<String> {
        store.get(&tenant(), &user(user_id)).await.unwrap()
    }

    // ════════════════════════════════════════════════════════════════════════════════
    // Completed turns
    // ════════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn first_turn_persists_exchange_and_returns_completion() {
        let h = harness(
            MockCompletionGateway::new().with_completion("Hello, Alice!"),
            MockTranslationBridge::new(),
        );

        let result = h.handler.handle(command(english_turn("alice", "Alice", "Hi"))).await;

        assert_eq!(result.outcome, TurnOutcome::Completed);
        assert_eq!(result.reply, "Hello, Alice!");
        assert_eq!(result.user_id, "alice");
        assert_eq!(
            h.gateway.last_call().as_deref(),
            Some("[ Genre: Romance ]   Alice said: \"Hi\" Waifu said: \"")
        );
        assert_eq!(
            stored(&h.store, "alice").await.as_deref(),
            Some(" Alice said: \"Hi\" Waifu said: \"Hello, Alice!\"")
        );
    }

    #[tokio::test]
    async fn second_turn_builds_on_history() {
        let h = harness(
            MockCompletionGateway::new()
                .with_completion("Hey")
                .with_completion("Fine"),
            MockTranslationBridge::new(),
        );

        h.handler.handle(command(english_turn("bob", "Bob", "Hi"))).await;
        h.handler.handle(command(english_turn("bob", "Bob", "How are you?"))).await;

        assert_eq!(
            stored(&h.store, "bob").await.as_deref(),
            Some(" Bob said: \"Hi\" Waifu said: \"Hey\" Bob said: \"How are you?\" Waifu said: \"Fine\"")
        );
    }

    #[tokio::test]
    async fn missing_user_id_uses_default_user() {
        let h = harness(MockCompletionGateway::new(), MockTranslationBridge::new());
        let result = h
            .handler
            .handle(command(TurnFields {
                message: Some("Hi".to_string()),
                translate_from: Some("en".to_string()),
                ..Default::default()
            }))
            .await;

        assert_eq!(result.user_id, "default2");
        assert!(stored(&h.store, "default2").await.is_some());
    }

    #[tokio::test]
    async fn situation_reaches_model_but_not_transcript() {
        let h = harness(
            MockCompletionGateway::new().with_completion("Mm"),
            MockTranslationBridge::new(),
        );
        let mut fields = english_turn("carol", "Carol", "Hello");
        fields.situation = Some("A rainy night in Paris".to_string());

        h.handler.handle(command(fields)).await;

        assert!(h.gateway.last_call().unwrap().contains("A rainy night in Paris"));
        assert!(!stored(&h.store, "carol").await.unwrap().contains("rainy"));
    }

    #[tokio::test]
    async fn stored_transcript_is_capped_at_storage_ceiling() {
        let completion = "c".repeat(4000);
        let h = harness(
            MockCompletionGateway::new().with_completion(completion.clone()),
            MockTranslationBridge::new(),
        );

        h.handler.handle(command(english_turn("dave", "Dave", "Tell me a story"))).await;

        let transcript = stored(&h.store, "dave").await.unwrap();
        let candidate = format!(" Dave said: \"Tell me a story\" Waifu said: \"{completion}\"");
        assert_eq!(transcript.chars().count(), 3300);
        assert_eq!(transcript, candidate[candidate.len() - 3300..]);
    }

    // ════════════════════════════════════════════════════════════════════════════════
    // Translation
    // ════════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn pivot_source_skips_both_translations() {
        let h = harness(
            MockCompletionGateway::new().with_completion("raw completion"),
            MockTranslationBridge::new(),
        );
        let mut fields = english_turn("erin", "Erin", "Hi");
        fields.translate_to = Some("auto".to_string());

        let result = h.handler.handle(command(fields)).await;

        assert_eq!(result.reply, "raw completion");
        assert_eq!(h.translator.call_count(), 0);
    }

    #[tokio::test]
    async fn auto_source_detected_as_pivot_skips_outbound() {
        let h = harness(
            MockCompletionGateway::new().with_completion("Sure"),
            MockTranslationBridge::new().detecting(LanguageTag::PIVOT),
        );
        let mut fields = english_turn("fay", "Fay", "Hello there");
        fields.translate_from = None;

        let result = h.handler.handle(command(fields)).await;

        assert_eq!(result.reply, "Sure");
        assert_eq!(h.translator.call_count(), 1);
    }

    #[tokio::test]
    async fn auto_source_translates_back_to_detected_language() {
        let h = harness(
            MockCompletionGateway::new().with_completion("Hi there"),
            MockTranslationBridge::new().detecting(resolve("fr")),
        );
        let fields = TurnFields {
            user_id: Some("gus".to_string()),
            message: Some("Bonjour".to_string()),
            ..Default::default()
        };

        let result = h.handler.handle(command(fields)).await;

        assert_eq!(result.reply, "[fr] Hi there");
        let calls = h.translator.get_calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].target, LanguageTag::PIVOT);
        assert_eq!(calls[0].source, LanguageTag::AUTO);
        assert_eq!(calls[1].target, resolve("fr"));
        assert_eq!(calls[1].source, LanguageTag::PIVOT);
        // The transcript keeps the pivot-language completion
        assert!(stored(&h.store, "gus").await.unwrap().ends_with("Hi there\""));
        // Brackets from the mock are cleaned before assembly
        assert!(h.gateway.last_call().unwrap().contains("You said: \"en Bonjour\""));
    }

    #[tokio::test]
    async fn explicit_target_wins() {
        let h = harness(
            MockCompletionGateway::new().with_completion("Okay"),
            MockTranslationBridge::new(),
        );
        let mut fields = english_turn("hal", "Hal", "Hi");
        fields.translate_to = Some("de".to_string());

        let result = h.handler.handle(command(fields)).await;

        assert_eq!(result.reply, "[de] Okay");
    }

    #[tokio::test]
    async fn explicit_source_translates_back_to_source() {
        let h = harness(
            MockCompletionGateway::new().with_completion("Good"),
            MockTranslationBridge::new(),
        );
        let fields = TurnFields {
            user_id: Some("ivy".to_string()),
            message: Some("Hola".to_string()),
            translate_from: Some("es".to_string()),
            ..Default::default()
        };

        let result = h.handler.handle(command(fields)).await;

        assert_eq!(result.reply, "[es] Good");
    }

    #[tokio::test]
    async fn inbound_translation_failure_returns_translation_notice() {
        let h = harness(
            MockCompletionGateway::new(),
            MockTranslationBridge::new().with_error(TranslationError::Timeout { timeout_secs: 15 }),
        );
        let fields = TurnFields {
            user_id: Some("jan".to_string()),
            message: Some("Hallo".to_string()),
            translate_from: Some("de".to_string()),
            ..Default::default()
        };

        let result = h.handler.handle(command(fields)).await;

        assert_eq!(result.reply, UserNotice::TRANSLATION_ERROR);
        assert_eq!(result.outcome, TurnOutcome::Failed(FailureReason::Translation));
        assert_eq!(h.gateway.call_count(), 0);
        assert!(stored(&h.store, "jan").await.is_none());
    }

    // ════════════════════════════════════════════════════════════════════════════════
    // Degraded and failed turns
    // ════════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn html_payload_is_replaced_and_not_persisted() {
        let h = harness(
            MockCompletionGateway::new()
                .with_completion("<!DOCTYPE HTML PUBLIC \"-//IETF//DTD HTML 2.0//EN\"><html>502</html>"),
            MockTranslationBridge::new(),
        );
        let mut fields = english_turn("kim", "Kim", "Hi");
        fields.translate_to = Some("fr".to_string());

        let result = h.handler.handle(command(fields)).await;

        assert_eq!(result.reply, UserNotice::DEFAULT_MODEL_UNAVAILABLE);
        assert_eq!(result.outcome, TurnOutcome::Degraded(DegradedReason::HtmlPayload));
        let transcript = stored(&h.store, "kim").await.unwrap();
        assert!(!transcript.contains("DOCTYPE"));
        assert!(!transcript.contains("<html>"));
        assert_eq!(h.translator.call_count(), 0);
    }

    #[tokio::test]
    async fn error_sentinel_returns_retry_notice_without_persisting() {
        let h = harness(
            MockCompletionGateway::new().with_completion("error"),
            MockTranslationBridge::new(),
        );

        let result = h.handler.handle(command(english_turn("lee", "Lee", "Hi"))).await;

        assert_eq!(result.reply, UserNotice::TEMPORARY_ERROR);
        assert_eq!(result.outcome, TurnOutcome::Degraded(DegradedReason::ErrorSentinel));
        assert_eq!(stored(&h.store, "lee").await.as_deref(), Some(""));
    }

    #[tokio::test]
    async fn gateway_failure_returns_configured_unavailable_message() {
        let gateway = MockCompletionGateway::new().with_error(GatewayError::Timeout { timeout_secs: 120 });
        let store = InMemoryTranscriptStore::new();
        store.put(&tenant(), &user("max"), "kept history").await.unwrap();
        let handler = ProcessTurnHandler::new(
            Arc::new(store.clone()),
            Arc::new(gateway),
            Arc::new(MockTranslationBridge::new()),
            PromptAssembler::new(PromptBudget::default(), "Romance"),
            InputLimits::default(),
        )
        .with_unavailable_message("Model is resting.");

        let result = handler.handle(command(english_turn("max", "Max", "Hi"))).await;

        assert_eq!(result.reply, "Model is resting.");
        assert_eq!(result.outcome, TurnOutcome::Failed(FailureReason::Gateway));
        assert_eq!(stored(&store, "max").await.as_deref(), Some("kept history"));
    }

    #[tokio::test]
    async fn invalid_user_id_is_rejected_before_dispatch() {
        let h = harness(MockCompletionGateway::new(), MockTranslationBridge::new());

        let result = h
            .handler
            .handle(command(english_turn("not valid!", "Ned", "Hi")))
            .await;

        assert_eq!(result.reply, UserNotice::REJECTED_INPUT);
        assert_eq!(result.user_id, "not valid!");
        assert_eq!(result.outcome, TurnOutcome::Failed(FailureReason::InvalidInput));
        assert_eq!(h.gateway.call_count(), 0);
        assert!(h.store.is_empty().await);
    }

    struct FailingStore;

    #[async_trait]
    impl TranscriptStore for FailingStore {
        async fn get(&self, _: &TenantId, _: &UserId) -> Result<Option<String>, StoreError> {
            Err(StoreError::connection("database is locked"))
        }

        async fn find(&self, _: &TenantId, _: &UserId) -> Result<Option<ConversationRecord>, StoreError> {
            Err(StoreError::connection("database is locked"))
        }

        async fn put(&self, _: &TenantId, _: &UserId, _: &str) -> Result<(), StoreError> {
            Err(StoreError::connection("database is locked"))
        }

        async fn create(&self, _: &TenantId, _: &UserId) -> Result<bool, StoreError> {
            Err(StoreError::connection("database is locked"))
        }

        async fn exists(&self, _: &TenantId, _: &UserId) -> Result<bool, StoreError> {
            Err(StoreError::connection("database is locked"))
        }

        async fn delete(&self, _: &TenantId, _: &UserId) -> Result<bool, StoreError> {
            Err(StoreError::connection("database is locked"))
        }

        async fn count(&self, _: &TenantId) -> Result<u64, StoreError> {
            Err(StoreError::connection("database is locked"))
        }

        async fn list_page(&self, _: &TenantId, _: u32, _: u32) -> Result<Vec<UserId>, StoreError> {
            Err(StoreError::connection("database is locked"))
        }
    }

    #[tokio::test]
    async fn store_failure_returns_database_notice() {
        let gateway = MockCompletionGateway::new();
        let handler = ProcessTurnHandler::new(
            Arc::new(FailingStore),
            Arc::new(gateway.clone()),
            Arc::new(MockTranslationBridge::new()),
            PromptAssembler::new(PromptBudget::default(), "Romance"),
            InputLimits::default(),
        );

        let result = handler.handle(command(english_turn("oli", "Oli", "Hi"))).await;

        assert_eq!(result.reply, UserNotice::STORE_ERROR);
        assert_eq!(result.outcome, TurnOutcome::Failed(FailureReason::Store));
        assert!(!result.reply.contains("locked"));
        assert_eq!(gateway.call_count(), 0);
    }

    // ════════════════════════════════════════════════════════════════════════════════
    // Concurrency
    // ════════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn serialized_turns_see_each_others_history() {
        let gateway = MockCompletionGateway::new()
            .with_completion("one")
            .with_completion("two")
            .with_delay(Duration::from_millis(20));
        let store = InMemoryTranscriptStore::new();
        let handler = ProcessTurnHandler::new(
            Arc::new(store.clone()),
            Arc::new(gateway),
            Arc::new(MockTranslationBridge::new()),
            PromptAssembler::new(PromptBudget::default(), "Romance"),
            InputLimits::default(),
        )
        .with_turn_serialization(true);

        tokio::join!(
            handler.handle(command(english_turn("pat", "Pat", "first"))),
            handler.handle(command(english_turn("pat", "Pat", "second"))),
        );

        let transcript = stored(&store, "pat").await.unwrap();
        assert!(transcript.contains("\"one\""), "{transcript}");
        assert!(transcript.contains("\"two\""), "{transcript}");
    }
}

//! DraftJustificationHandler - Asks a completion service for the
//! "Justificativa e Necessidade da Contratação" text.
//!
//! The call is optional and never blocks generation: every failure is
//! logged and turned into `JustificationDraft::Fallback`, in which case the
//! document keeps only its static §2 boilerplate.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::domain::document::LAW_REFERENCE;
use crate::domain::foundation::is_filled;
use crate::ports::{AIError, AIProvider, CompletionRequest, FinishReason};

use super::request_budget::{BudgetDecision, RequestBudget};

/// System prompt sent with every draft request.
pub const SYSTEM_PROMPT: &str = "Você é um redator técnico especialista em licitações públicas.";

/// Builds the instructional prompt around the object description.
pub fn justification_prompt(object: &str, municipality: &str) -> String {
    format!(
        "Você é um especialista em licitações públicas, com mais de 10 anos de experiência, \
atuando como responsável técnico pela elaboração e instrução de processos de contratação na \
Prefeitura Municipal de {municipality}. Considerando a {law} e demais normativos aplicáveis, \
elabore a seção \"Justificativa e da Necessidade da Contratação\" para compor o Termo de \
Referência, cujo objeto é: \"{object}\".

O texto deve:
- Apresentar a descrição clara da demanda pública, alinhada às atividades administrativas e operacionais do município e suas secretarias.
- Explicar por que a contratação é necessária, com base em evidências práticas e na ausência de estrutura própria da Administração (quando aplicável).
- Demonstrar que o objeto é essencial à continuidade dos serviços públicos ou à implementação de políticas públicas locais.
- Fundamentar-se nas especificações e quantidades descritas no Termo de Referência.
- Assegurar que a demanda está alinhada ao Plano Anual de Contratações (PAC), e que há previsão orçamentária compatível.
- Apontar a impossibilidade de execução direta pela Administração, se for o caso.
- Incluir os fundamentos legais pertinentes, especialmente o artigo 6º, inciso XXIII, alínea ‘b’, da {law}.
- Ser redigida em linguagem técnica, objetiva e juridicamente fundamentada, voltada à instrução de um processo administrativo de contratação pública.",
        municipality = municipality,
        law = LAW_REFERENCE,
        object = object.trim(),
    )
}

/// Command to draft a justification.
#[derive(Debug, Clone)]
pub struct DraftJustificationCommand {
    /// Object description the justification is about.
    pub object: String,
    /// Municipality named in the prompt.
    pub municipality: String,
    /// Trace id shared with the surrounding generation.
    pub trace_id: String,
}

/// Sampling and deadline settings for draft requests.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftSettings {
    pub temperature: f32,
    pub max_tokens: u32,
    /// Deadline for the whole call, provider retries included.
    pub deadline: Duration,
}

impl Default for DraftSettings {
    fn default() -> Self {
        Self {
            temperature: 0.4,
            max_tokens: 1000,
            deadline: Duration::from_secs(90),
        }
    }
}

/// Why a draft could not be used.
#[derive(Debug, Error)]
pub enum DraftFailure {
    #[error("object description is blank")]
    BlankObject,

    #[error("request budget exhausted, retry in {retry_after_secs}s")]
    BudgetExhausted { retry_after_secs: u64 },

    #[error("no answer within {deadline_secs}s")]
    DeadlineExceeded { deadline_secs: u64 },

    #[error("provider failed: {0}")]
    Provider(#[from] AIError),

    #[error("provider returned an empty answer")]
    EmptyAnswer,
}

/// Outcome of a draft attempt.
#[derive(Debug)]
pub enum JustificationDraft {
    /// Text to place in §2.
    Drafted(String),
    /// Nothing usable; the static boilerplate stands alone.
    Fallback { reason: DraftFailure },
}

impl JustificationDraft {
    /// The drafted text, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            JustificationDraft::Drafted(text) => Some(text),
            JustificationDraft::Fallback { .. } => None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, JustificationDraft::Fallback { .. })
    }
}

/// Handler for drafting justifications.
///
/// # Dependencies
///
/// - `AIProvider`: Completion service
/// - `RequestBudget`: Fixed-window limit on outbound calls
///
/// # Usage
///
/// ```rust,ignore
/// let handler = DraftJustificationHandler::new(provider, budget, DraftSettings::default());
/// let draft = handler.handle(cmd).await;
/// ```
pub struct DraftJustificationHandler {
    provider: Arc<dyn AIProvider>,
    budget: Arc<RequestBudget>,
    settings: DraftSettings,
}

impl DraftJustificationHandler {
    pub fn new(
        provider: Arc<dyn AIProvider>,
        budget: Arc<RequestBudget>,
        settings: DraftSettings,
    ) -> Self {
        Self {
            provider,
            budget,
            settings,
        }
    }

    pub async fn handle(&self, cmd: DraftJustificationCommand) -> JustificationDraft {
        let provider = self.provider.provider_info();
        match self.try_draft(&cmd).await {
            Ok(text) => {
                tracing::info!(
                    trace_id = %cmd.trace_id,
                    provider = %provider.name,
                    model = %provider.model,
                    chars = text.chars().count(),
                    "Justification drafted"
                );
                JustificationDraft::Drafted(text)
            }
            Err(reason) => {
                tracing::warn!(
                    trace_id = %cmd.trace_id,
                    provider = %provider.name,
                    reason = %reason,
                    "Justification draft unavailable, keeping static text"
                );
                JustificationDraft::Fallback { reason }
            }
        }
    }

    async fn try_draft(&self, cmd: &DraftJustificationCommand) -> Result<String, DraftFailure> {
        if !is_filled(&cmd.object) {
            return Err(DraftFailure::BlankObject);
        }

        if let BudgetDecision::Denied { retry_after } = self.budget.try_acquire().await {
            return Err(DraftFailure::BudgetExhausted {
                retry_after_secs: retry_after.as_secs(),
            });
        }

        let request = CompletionRequest::new(
            cmd.trace_id.clone(),
            justification_prompt(&cmd.object, &cmd.municipality),
        )
        .with_instructions(SYSTEM_PROMPT)
        .with_max_tokens(self.settings.max_tokens)
        .with_temperature(self.settings.temperature);

        let response = tokio::time::timeout(self.settings.deadline, self.provider.complete(request))
            .await
            .map_err(|_| DraftFailure::DeadlineExceeded {
                deadline_secs: self.settings.deadline.as_secs(),
            })??;

        if response.finish_reason == FinishReason::Length {
            tracing::debug!(
                trace_id = %cmd.trace_id,
                completion_tokens = response.usage.completion_tokens,
                "Draft truncated at max_tokens"
            );
        }

        let text = response.content.trim();
        if text.is_empty() {
            return Err(DraftFailure::EmptyAnswer);
        }
        Ok(text.to_string())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};

    fn command(object: &str) -> DraftJustificationCommand {
        DraftJustificationCommand {
            object: object.to_string(),
            municipality: "Brasnorte-MT".to_string(),
            trace_id: "trace-1".to_string(),
        }
    }

    fn handler_with(provider: MockAIProvider, budget: u32) -> DraftJustificationHandler {
        DraftJustificationHandler::new(
            Arc::new(provider),
            Arc::new(RequestBudget::per_minute(budget)),
            DraftSettings::default(),
        )
    }

    // ───────────────────────────────────────────────────────────────
    // Prompt tests
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn prompt_quotes_object_and_municipality() {
        let prompt = justification_prompt("  Locação de veículos ", "Brasnorte-MT");
        assert!(prompt.contains("cujo objeto é: \"Locação de veículos\"."));
        assert!(prompt.contains("Prefeitura Municipal de Brasnorte-MT"));
        assert!(prompt.contains("artigo 6º, inciso XXIII"));
    }

    // ───────────────────────────────────────────────────────────────
    // Success tests
    // ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn returns_trimmed_draft() {
        let provider = MockAIProvider::new().with_response("\n  A contratação se justifica.  \n");
        let handler = handler_with(provider.clone(), 10);

        let draft = handler.handle(command("Locação de veículos")).await;

        assert_eq!(draft.text(), Some("A contratação se justifica."));
        let calls = provider.get_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].instructions.as_deref(), Some(SYSTEM_PROMPT));
        assert_eq!(calls[0].max_tokens, Some(1000));
        assert_eq!(calls[0].temperature, Some(0.4));
        assert_eq!(calls[0].trace_id, "trace-1");
    }

    // ───────────────────────────────────────────────────────────────
    // Fallback tests
    // ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn provider_error_falls_back() {
        let provider = MockAIProvider::new().with_error(MockError::Unavailable {
            message: "down".to_string(),
        });
        let draft = handler_with(provider, 10).handle(command("obj")).await;

        assert!(matches!(
            draft,
            JustificationDraft::Fallback {
                reason: DraftFailure::Provider(AIError::Unavailable { .. })
            }
        ));
    }

    #[tokio::test]
    async fn empty_answer_falls_back() {
        let provider = MockAIProvider::new().with_response("   ");
        let draft = handler_with(provider, 10).handle(command("obj")).await;

        assert!(matches!(
            draft,
            JustificationDraft::Fallback {
                reason: DraftFailure::EmptyAnswer
            }
        ));
    }

    #[tokio::test]
    async fn blank_object_skips_provider() {
        let provider = MockAIProvider::new();
        let draft = handler_with(provider.clone(), 10).handle(command(" ")).await;

        assert!(draft.is_fallback());
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn exhausted_budget_skips_provider() {
        let provider = MockAIProvider::new();
        let handler = handler_with(provider.clone(), 1);

        assert!(!handler.handle(command("obj")).await.is_fallback());
        let second = handler.handle(command("obj")).await;

        assert!(matches!(
            second,
            JustificationDraft::Fallback {
                reason: DraftFailure::BudgetExhausted { .. }
            }
        ));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn slow_provider_hits_deadline() {
        let provider = MockAIProvider::new().with_delay(Duration::from_millis(200));
        let handler = DraftJustificationHandler::new(
            Arc::new(provider),
            Arc::new(RequestBudget::per_minute(10)),
            DraftSettings {
                deadline: Duration::from_millis(20),
                ..DraftSettings::default()
            },
        );

        let draft = handler.handle(command("obj")).await;

        assert!(matches!(
            draft,
            JustificationDraft::Fallback {
                reason: DraftFailure::DeadlineExceeded { .. }
            }
        ));
    }

    #[test]
    fn draft_accessors() {
        let drafted = JustificationDraft::Drafted("x".to_string());
        assert_eq!(drafted.text(), Some("x"));

        let fallback = JustificationDraft::Fallback {
            reason: DraftFailure::EmptyAnswer,
        };
        assert!(fallback.is_fallback());
        assert_eq!(fallback.text(), None);
    }
}

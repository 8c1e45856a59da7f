//! Token truncation and the per-request ingestion budget.
//!
//! Two budgets bound every orchestrated request: a token ceiling per
//! fragment (the embedding backend rejects oversized inputs) and an overall
//! count of `add` calls shared across all sources feeding one request.

use tiktoken_rs::CoreBPE;

use crate::error::{Result, RetrievalError};

/// Truncates text to a token ceiling using the target embedding model's
/// vocabulary.
///
/// Truncation is a pure function of `(text, max_tokens)`: text at or under
/// the ceiling is returned unchanged, text over it is decoded from exactly
/// the first `max_tokens` tokens. It never fails.
pub struct TokenBudgeter {
    bpe: CoreBPE,
}

impl TokenBudgeter {
    /// Build a budgeter for a model name (e.g. `gpt-3.5-turbo-16k`).
    pub fn for_model(model: &str) -> Result<Self> {
        let bpe = tiktoken_rs::get_bpe_from_model(model)
            .map_err(|e| RetrievalError::Tokenizer(e.to_string()))?;
        Ok(Self { bpe })
    }

    /// Truncate `text` to at most `max_tokens` tokens.
    pub fn truncate(&self, text: &str, max_tokens: usize) -> String {
        let tokens = self.bpe.encode_ordinary(text);
        if tokens.len() <= max_tokens {
            return text.to_string();
        }

        // A cut can land inside a multi-byte character; back off token by
        // token until the prefix decodes cleanly.
        let mut end = max_tokens;
        while end > 0 {
            if let Ok(decoded) = self.bpe.decode(tokens[..end].to_vec()) {
                return decoded;
            }
            end -= 1;
        }
        String::new()
    }
}

/// Request-scoped counter capping the number of `add` calls issued for one
/// orchestrated request, across all sources combined.
///
/// The cap is inclusive: once `limit` takes have succeeded, every further
/// `try_take` refuses and the caller stops ingesting for the whole request.
#[derive(Debug)]
pub struct IngestionBudget {
    used: usize,
    limit: usize,
}

impl IngestionBudget {
    /// Create a budget allowing at most `limit` ingestion calls.
    pub fn new(limit: usize) -> Self {
        Self { used: 0, limit }
    }

    /// Claim one ingestion slot. Returns `false` once the budget is spent.
    pub fn try_take(&mut self) -> bool {
        if self.used < self.limit {
            self.used += 1;
            true
        } else {
            false
        }
    }

    /// Number of slots claimed so far.
    pub fn used(&self) -> usize {
        self.used
    }

    /// Whether the budget has been fully spent.
    pub fn is_exhausted(&self) -> bool {
        self.used >= self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn budgeter() -> TokenBudgeter {
        TokenBudgeter::for_model("gpt-3.5-turbo-16k").unwrap()
    }

    #[test]
    fn test_short_text_unchanged() {
        let b = budgeter();
        let text = "a short paragraph about nothing in particular";
        assert_eq!(b.truncate(text, 8190), text);
    }

    #[test]
    fn test_truncation_respects_ceiling() {
        let b = budgeter();
        let text = "lorem ipsum dolor sit amet ".repeat(200);
        let truncated = b.truncate(&text, 50);
        assert!(b.bpe.encode_ordinary(&truncated).len() <= 50);
        assert!(truncated.len() < text.len());
    }

    #[test]
    fn test_truncation_is_idempotent() {
        let b = budgeter();
        let text = "the quick brown fox jumps over the lazy dog ".repeat(100);
        let once = b.truncate(&text, 30);
        assert_eq!(b.truncate(&once, 30), once);
    }

    #[test]
    fn test_zero_ceiling_yields_empty() {
        let b = budgeter();
        assert_eq!(b.truncate("anything at all", 0), "");
    }

    #[test]
    fn test_budget_counts_takes() {
        let mut budget = IngestionBudget::new(3);
        assert!(budget.try_take());
        assert!(budget.try_take());
        assert!(budget.try_take());
        assert!(!budget.try_take());
        assert!(!budget.try_take());
        assert_eq!(budget.used(), 3);
        assert!(budget.is_exhausted());
    }

    #[test]
    fn test_zero_budget_refuses_immediately() {
        let mut budget = IngestionBudget::new(0);
        assert!(!budget.try_take());
        assert_eq!(budget.used(), 0);
    }
}

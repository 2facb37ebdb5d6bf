// src/common/deadline.rs

use std::{future::Future, time::Duration};

use crate::common::error::AppError;

/// Prazo aplicado a cada chamada ao store.
///
/// Quando o prazo expira o future é descartado (o que aborta a chamada em curso)
/// e o chamador recebe `AppError::Timeout`. Não há retentativas aqui.
#[derive(Debug, Clone, Copy)]
pub struct Deadline(Duration);

impl Deadline {
    pub fn new(limit: Duration) -> Self {
        Self(limit)
    }

    pub async fn run<T, F>(self, call: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, AppError>>,
    {
        match tokio::time::timeout(self.0, call).await {
            Ok(result) => result,
            Err(_) => Err(AppError::Timeout(self.0)),
        }
    }
}

impl Default for Deadline {
    fn default() -> Self {
        Self(Duration::from_secs(5))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn passes_through_fast_calls() {
        let value = Deadline::new(Duration::from_millis(50))
            .run(async { Ok::<_, AppError>(42) })
            .await
            .unwrap();

        assert_eq!(value, 42);
    }

    #[tokio::test]
    async fn slow_calls_become_timeouts() {
        let result = Deadline::new(Duration::from_millis(10))
            .run(async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok::<_, AppError>(())
            })
            .await;

        assert!(matches!(result, Err(AppError::Timeout(_))));
    }
}

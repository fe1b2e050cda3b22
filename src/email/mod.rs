//! 이메일 수집 저장소
//!
//! 프로세스 수명 동안만 유지되는 메모리 저장소입니다 (재시작 시 초기화).
//! 서버 상태가 [`EmailStore`] 트레이트 객체로 소유하며,
//! 중복 확인과 삽입은 하나의 락 안에서 처리됩니다.

use std::sync::Mutex;

use anyhow::Result;

// ============================================================================
// EmailStore Trait
// ============================================================================

/// 이메일 저장소 트레이트
pub trait EmailStore: Send + Sync {
    /// 이메일 추가 (이미 있으면 무시). 현재 저장된 개수 반환
    fn add(&self, email: &str) -> Result<usize>;

    /// 저장된 이메일 목록 (삽입 순서)
    fn emails(&self) -> Result<Vec<String>>;
}

/// 이메일 정규화
///
/// `@` 가 없으면 `None`. 있으면 앞뒤 공백 제거 + 소문자.
pub fn normalize_email(raw: &str) -> Option<String> {
    if !raw.contains('@') {
        return None;
    }
    Some(raw.trim().to_lowercase())
}

// ============================================================================
// InMemoryEmailStore
// ============================================================================

/// 메모리 이메일 저장소
#[derive(Debug, Default)]
pub struct InMemoryEmailStore {
    emails: Mutex<Vec<String>>,
}

impl InMemoryEmailStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EmailStore for InMemoryEmailStore {
    fn add(&self, email: &str) -> Result<usize> {
        let mut emails = self
            .emails
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock error: {}", e))?;

        if !emails.iter().any(|e| e == email) {
            emails.push(email.to_string());
            tracing::info!("Captured email ({} total)", emails.len());
        }

        Ok(emails.len())
    }

    fn emails(&self) -> Result<Vec<String>> {
        let emails = self
            .emails
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock error: {}", e))?;
        Ok(emails.clone())
    }
}

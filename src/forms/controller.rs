//! 表單狀態機：`Editing → Submitting → (Success | Editing + submit 錯誤)`。
//!
//! `FormState::reduce` 是純粹的狀態轉移，不做任何 I/O；需要寫入時回傳
//! `Effect::Persist`，由 `FormController` 交給 `Submitter` 執行後再把結果
//! 以 `FormAction::Resolved` 餵回去。

use crate::forms::errors::{FieldError, FormErrors, FormField};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 表單資料本身：知道如何套用一次編輯，以及如何檢查必填欄位
pub trait FormModel: Clone + Send + Sync {
    type Edit: Send;

    /// 套用編輯並回傳被修改的欄位 (用來清掉該欄位的錯誤)
    fn apply(&mut self, edit: Self::Edit) -> FormField;

    fn validate(&self) -> std::result::Result<(), Vec<FieldError>>;
}

/// 實際執行寫入的一方
#[async_trait]
pub trait Submitter<D>: Send + Sync {
    async fn submit(&self, data: &D) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Editing,
    Submitting,
    Success,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormAction<E> {
    Edit(E),
    Submit,
    Resolved(std::result::Result<(), String>),
}

impl<E> FormAction<E> {
    fn kind(&self) -> &'static str {
        match self {
            FormAction::Edit(_) => "edit",
            FormAction::Submit => "submit",
            FormAction::Resolved(_) => "resolved",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect<D> {
    None,
    /// 以這份快照呼叫寫入
    Persist(D),
}

/// 呈現層要畫的三種畫面
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View<'a> {
    Input,
    ErrorBanner(&'a str),
    Success,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormState<D> {
    data: D,
    errors: FormErrors,
    phase: Phase,
}

impl<D: FormModel> FormState<D> {
    pub fn new(data: D) -> Self {
        Self {
            data,
            errors: FormErrors::new(),
            phase: Phase::Editing,
        }
    }

    pub fn data(&self) -> &D {
        &self.data
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// 送出中：按鈕停用
    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Submitting
    }

    pub fn view(&self) -> View<'_> {
        match self.phase {
            Phase::Success => View::Success,
            _ => match self.errors.get(FormField::Submit) {
                Some(message) => View::ErrorBanner(message),
                None => View::Input,
            },
        }
    }

    pub fn reduce(&mut self, action: FormAction<D::Edit>) -> Effect<D> {
        match (self.phase, action) {
            (Phase::Editing, FormAction::Edit(edit)) => {
                let field = self.data.apply(edit);
                self.errors.clear(field);
                Effect::None
            }
            (Phase::Editing, FormAction::Submit) => {
                self.errors.clear_all();
                match self.data.validate() {
                    Ok(()) => {
                        self.phase = Phase::Submitting;
                        Effect::Persist(self.data.clone())
                    }
                    Err(field_errors) => {
                        tracing::warn!(
                            "Form rejected with {} field error(s)",
                            field_errors.len()
                        );
                        self.errors.extend(field_errors);
                        Effect::None
                    }
                }
            }
            (Phase::Submitting, FormAction::Resolved(Ok(()))) => {
                self.phase = Phase::Success;
                Effect::None
            }
            (Phase::Submitting, FormAction::Resolved(Err(message))) => {
                self.phase = Phase::Editing;
                self.errors.set(FormField::Submit, message);
                Effect::None
            }
            (phase, action) => {
                tracing::debug!("Ignoring {} action while {:?}", action.kind(), phase);
                Effect::None
            }
        }
    }
}

/// 把狀態機和實際寫入接起來；`&mut self` 保證同一張表單一次只有一個送出
pub struct FormController<D: FormModel, S: Submitter<D>> {
    state: FormState<D>,
    submitter: S,
}

impl<D: FormModel, S: Submitter<D>> FormController<D, S> {
    pub fn new(data: D, submitter: S) -> Self {
        Self {
            state: FormState::new(data),
            submitter,
        }
    }

    pub fn state(&self) -> &FormState<D> {
        &self.state
    }

    pub fn submitter(&self) -> &S {
        &self.submitter
    }

    pub fn edit(&mut self, edit: D::Edit) {
        self.state.reduce(FormAction::Edit(edit));
    }

    pub async fn submit(&mut self) -> Phase {
        if let Effect::Persist(snapshot) = self.state.reduce(FormAction::Submit) {
            let outcome = self
                .submitter
                .submit(&snapshot)
                .await
                .map_err(|e| {
                    tracing::error!("❌ Form submission failed: {}", e);
                    e.user_friendly_message()
                });
            self.state.reduce(FormAction::Resolved(outcome));
        }
        self.state.phase()
    }

    /// 關閉表單，交回最後的狀態
    pub fn close(self) -> FormState<D> {
        self.state
    }
}

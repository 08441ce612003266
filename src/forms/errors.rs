use std::collections::BTreeMap;
use std::fmt;

/// 表單上已知的欄位，外加頂層送出錯誤用的 `Submit`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormField {
    FirstName,
    LastName,
    Email,
    ContactEmail,
    Phone,
    Church,
    Commitments,
    BusinessName,
    BusinessAddress,
    Website,
    BusinessDescription,
    SubscriptionTier,
    MonthlyFee,
    Submit,
}

impl FormField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::FirstName => "first_name",
            FormField::LastName => "last_name",
            FormField::Email => "email",
            FormField::ContactEmail => "contact_email",
            FormField::Phone => "phone",
            FormField::Church => "church",
            FormField::Commitments => "commitments",
            FormField::BusinessName => "business_name",
            FormField::BusinessAddress => "business_address",
            FormField::Website => "website",
            FormField::BusinessDescription => "business_description",
            FormField::SubscriptionTier => "subscription_tier",
            FormField::MonthlyFee => "monthly_fee",
            FormField::Submit => "submit",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: FormField,
    pub message: String,
}

impl FieldError {
    pub fn new(field: FormField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// 欄位 → 錯誤訊息；同一欄位只保留最後一次設定的訊息
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    entries: BTreeMap<FormField, String>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: FormField, message: impl Into<String>) {
        self.entries.insert(field, message.into());
    }

    pub fn clear(&mut self, field: FormField) {
        self.entries.remove(&field);
    }

    pub fn clear_all(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.entries.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.entries.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.entries.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}

impl Extend<FieldError> for FormErrors {
    fn extend<T: IntoIterator<Item = FieldError>>(&mut self, iter: T) {
        for error in iter {
            self.set(error.field, error.message);
        }
    }
}

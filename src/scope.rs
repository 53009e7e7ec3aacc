use oauth2::Scope as OAuth2Scope;
use std::fmt;

/// Intuit OAuth 2 scopes recognized by the QuickBooks platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Full access to the accounting API.
    Accounting,
    /// Access to the payments API.
    Payment,
    /// Access to payroll endpoints.
    Payroll,
    /// OpenID Connect authentication.
    OpenId,
    Profile,
    Email,
    Phone,
    Address,
}

impl Scope {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Accounting => "com.intuit.quickbooks.accounting",
            Self::Payment => "com.intuit.quickbooks.payment",
            Self::Payroll => "com.intuit.quickbooks.payroll",
            Self::OpenId => "openid",
            Self::Profile => "profile",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Address => "address",
        }
    }

    #[must_use]
    pub fn into_oauth2(self) -> OAuth2Scope {
        OAuth2Scope::new(self.as_str().to_string())
    }

    /// The scope set used by most accounting integrations.
    #[must_use]
    pub fn accounting_only() -> Vec<Self> {
        vec![Self::Accounting]
    }

    /// Accounting plus the OpenID Connect identity scopes.
    #[must_use]
    pub fn accounting_with_identity() -> Vec<Self> {
        vec![Self::Accounting, Self::OpenId, Self::Profile, Self::Email]
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

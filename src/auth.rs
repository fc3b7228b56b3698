use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};

/// Role claim issued by the external identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Traveler,
    Admin,
    PropertySales,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: Role,
    pub exp: usize,
    pub iat: usize,
}

/// The authenticated caller, decoded from the bearer token by the
/// authentication middleware.
#[derive(Debug, Clone)]
pub struct Principal {
    pub user_id: String,
    pub role: Role,
}

/// Capabilities gated on role alone. Ownership checks (pay your own
/// booking, cancel your own booking) stay with the engines.
#[derive(Debug, Clone, Copy)]
pub enum Action {
    ConfirmBooking,
    AccessAnyBooking,
    ManageCatalog,
    DeleteCatalog,
    ManageDocuments,
    ResolveEscalations,
}

pub fn allows(role: Role, action: Action) -> bool {
    use Action::*;
    use Role::*;

    match action {
        ConfirmBooking | AccessAnyBooking | ManageCatalog => {
            matches!(role, Admin | PropertySales)
        }
        DeleteCatalog | ManageDocuments | ResolveEscalations => matches!(role, Admin),
    }
}

pub fn sign_token(
    user_id: &str,
    role: Role,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: user_id.to_string(),
        role,
        exp: now + 3600 * 24 * 7, // Token expires after 1 week
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{decode, DecodingKey, Validation};

    #[test]
    fn policy_table() {
        assert!(allows(Role::Admin, Action::ConfirmBooking));
        assert!(allows(Role::PropertySales, Action::ConfirmBooking));
        assert!(!allows(Role::Traveler, Action::ConfirmBooking));

        assert!(allows(Role::PropertySales, Action::ManageCatalog));
        assert!(!allows(Role::PropertySales, Action::DeleteCatalog));

        assert!(allows(Role::Admin, Action::ResolveEscalations));
        assert!(!allows(Role::Traveler, Action::ResolveEscalations));
        assert!(!allows(Role::PropertySales, Action::ManageDocuments));
    }

    #[test]
    fn signed_token_round_trips() {
        let token = sign_token("user-1", Role::PropertySales, "secret").unwrap();
        let data = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"secret"),
            &Validation::default(),
        )
        .unwrap();
        assert_eq!(data.claims.sub, "user-1");
        assert_eq!(data.claims.role, Role::PropertySales);
    }
}

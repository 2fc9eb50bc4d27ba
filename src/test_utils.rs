#[cfg(test)]
pub mod fixtures {
    use crate::models::domain::Question;

    /// Creates one question per id, all in category 1
    pub fn question_pool(ids: &[i64]) -> Vec<Question> {
        ids.iter()
            .map(|id| {
                Question::new(
                    *id,
                    &format!("Question number {}?", id),
                    &format!("Answer {}", id),
                    1,
                    (*id % 5 + 1) as i32,
                )
            })
            .collect()
    }
}

#[cfg(test)]
pub mod tokens {
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::{json, Value};

    pub const TEST_SECRET: &str = "test_jwt_secret_key_for_the_coffee_shop";

    /// Signs `payload` with HS256
    pub fn mint(secret: &str, payload: &Value) -> String {
        encode(
            &Header::default(),
            payload,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("test token should encode")
    }

    /// Unexpired payload granting `permissions`
    pub fn payload_with(permissions: &[&str]) -> Value {
        let now = Utc::now();
        json!({
            "sub": "auth0|tester",
            "permissions": permissions,
            "iat": now.timestamp(),
            "exp": (now + Duration::hours(1)).timestamp(),
        })
    }

    /// Payload that expired an hour ago
    pub fn expired_payload(permissions: &[&str]) -> Value {
        let now = Utc::now();
        json!({
            "sub": "auth0|tester",
            "permissions": permissions,
            "iat": (now - Duration::hours(2)).timestamp(),
            "exp": (now - Duration::hours(1)).timestamp(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::tokens::*;

    #[test]
    fn test_fixtures_question_pool() {
        let pool = question_pool(&[3, 9]);
        assert_eq!(pool.len(), 2);
        assert_eq!(pool[0].id, 3);
        assert_eq!(pool[1].text, "Question number 9?");
    }

    #[test]
    fn test_minted_token_has_three_segments() {
        let token = mint(TEST_SECRET, &payload_with(&["get:drinks-detail"]));
        assert_eq!(token.split('.').count(), 3);
    }
}

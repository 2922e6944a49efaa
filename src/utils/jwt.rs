use crate::config::AppConfig;
use crate::errors::{PortalError, Result};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

// JWT Claims 结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,  // Subject (user ID)
    pub role: String, // 用户角色
    pub jti: String,  // 令牌唯一 ID，保证同一用户每次登录的会话键不同
    pub exp: usize,   // Expiration time (时间戳)
    pub iat: usize,   // Issued at (签发时间)
}

impl Claims {
    pub fn user_id(&self) -> Result<i64> {
        self.sub
            .parse::<i64>()
            .map_err(|_| PortalError::authentication("令牌中的用户标识无效"))
    }
}

pub struct JwtUtils;

impl JwtUtils {
    // 生成 Access Token（使用全局配置）
    pub fn generate_access_token(user_id: i64, role: &str) -> Result<String> {
        let config = AppConfig::get();
        Self::generate_token_with_expiry(
            &config.jwt.secret,
            user_id,
            role,
            chrono::Duration::minutes(config.jwt.access_token_expiry),
        )
    }

    // 生成带自定义过期时间的 Token
    pub fn generate_token_with_expiry(
        secret: &str,
        user_id: i64,
        role: &str,
        expiry_duration: chrono::Duration,
    ) -> Result<String> {
        let now = chrono::Utc::now();
        let expiration = now + expiry_duration;

        let claims = Claims {
            sub: user_id.to_string(),
            role: role.to_string(),
            jti: uuid::Uuid::new_v4().to_string(),
            exp: expiration.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let encoding_key = EncodingKey::from_secret(secret.as_ref());
        encode(&Header::default(), &claims, &encoding_key)
            .map_err(|e| PortalError::authentication(format!("JWT token 生成失败: {e}")))
    }

    // 验证 JWT token（使用全局配置）
    pub fn verify_access_token(token: &str) -> Result<Claims> {
        Self::verify_token(&AppConfig::get().jwt.secret, token)
    }

    // 验证 JWT token
    pub fn verify_token(secret: &str, token: &str) -> Result<Claims> {
        let decoding_key = DecodingKey::from_secret(secret.as_ref());
        let validation = Validation::default();

        decode::<Claims>(token, &decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| PortalError::authentication(format!("令牌无效: {e}")))
    }
}

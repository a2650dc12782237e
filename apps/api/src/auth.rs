//! Demo login gate for the recruiter dashboard.
//!
//! Checks a fixed set of demo accounts (email and password both matched
//! exactly) and echoes the user profile back.
//! There are no sessions, tokens or password hashes here.

use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;

struct DemoAccount {
    email: &'static str,
    password: &'static str,
    name: &'static str,
    role: &'static str,
}

const DEMO_ACCOUNTS: [DemoAccount; 3] = [
    DemoAccount {
        email: "john.doe@talenthub.com",
        password: "admin123",
        name: "John Doe",
        role: "HR Manager",
    },
    DemoAccount {
        email: "jane.smith@talenthub.com",
        password: "recruiter123",
        name: "Jane Smith",
        role: "Senior Recruiter",
    },
    DemoAccount {
        email: "demo@talenthub.com",
        password: "demo123",
        name: "Demo User",
        role: "Demo User",
    },
];

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DemoUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub avatar: Option<String>,
}

pub fn authenticate(email: &str, password: &str) -> Option<DemoUser> {
    DEMO_ACCOUNTS
        .iter()
        .find(|a| a.email == email && a.password == password)
        .map(|a| DemoUser {
            id: "1".to_string(),
            name: a.name.to_string(),
            email: a.email.to_string(),
            role: a.role.to_string(),
            avatar: None,
        })
}

/// POST /api/auth/login
pub async fn handle_login(Json(request): Json<LoginRequest>) -> Result<Json<DemoUser>, AppError> {
    match authenticate(&request.email, &request.password) {
        Some(user) => {
            info!("Demo login for {}", user.email);
            Ok(Json(user))
        }
        None => {
            warn!("Rejected login for {}", request.email);
            Err(AppError::Unauthorized(
                "Invalid email or password. Please try the demo credentials below.".to_string(),
            ))
        }
    }
}

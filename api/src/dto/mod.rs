//! Request and response shapes for the HTTP surface.

pub mod auth;

pub use auth::{
    ForgotPasswordRequest, LoginRequest, LoginResponse, MessageResponse, MsgResponse,
    ProfileUpdateRequest, ResetPasswordRequest, SignupRequest, UserDto,
};

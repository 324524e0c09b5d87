//! CAPTCHA module - external human-verification client

mod recaptcha;

pub use recaptcha::RecaptchaVerifier;

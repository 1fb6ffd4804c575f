pub mod passwords;
pub mod signin;
pub mod signup;

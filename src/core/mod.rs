pub mod amortization;
pub mod compounding;
pub mod social_security;
pub mod tax;

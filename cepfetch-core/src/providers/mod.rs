pub mod apicep;
pub mod viacep;

pub mod viacep;

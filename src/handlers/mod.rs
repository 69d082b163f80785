pub mod collections;
pub mod login;
pub mod pages;

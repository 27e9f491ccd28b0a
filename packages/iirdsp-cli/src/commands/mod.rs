pub mod batch;
pub mod demo;
pub mod design;
pub mod filter;
pub mod info;

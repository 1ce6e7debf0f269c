pub mod convert;
pub mod invoice;

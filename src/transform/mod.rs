pub mod string_ops;

pub mod circle_ops;

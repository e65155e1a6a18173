pub mod lzw;

//! Generated-style static tables: the universe of extensions,
//! instructions, and register names. These are the only place new
//! SMOL instructions or extensions would be added; the extractor,
//! registry, decoder, and bundle segmenter are all generic over them.

pub mod extensions;
pub mod instructions;
pub mod registers;

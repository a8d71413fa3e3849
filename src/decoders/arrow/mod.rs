pub mod account;

pub use account::{
    decode_arrow, ArrowDecoder, DecodedArrow, ARROW_ACCOUNT_DISCRIMINATOR, ARROW_PROGRAM_ID,
};

//! Protocol Module
//!
//! Framing and interpretation of the unit's binary reply protocol.
//!
//! ## Frame Format
//!
//! ```text
//! ┌──────────┬─────────────┬─────────────┬──────────┬──────────┐
//! │ STX (1)  │ Code echo   │   Payload   │ Cksum(1) │ ETX (1)  │
//! └──────────┴─────────────┴─────────────┴──────────┴──────────┘
//! ```
//!
//! The code echo answers the request code with the first byte incremented
//! by one, with three exceptions:
//! - `M` and `V` replies echo the single character unchanged
//! - `VS` headers belong to the synthetic `VS000M` firmware report, which
//!   has no matching request code
//!
//! Two-character codes beginning with `FU`, `FX`, or `FY` are extended
//! families carrying 4-character codes. The trailing checksum and ETX are
//! stripped, not verified.

mod frame;
mod interpret;

pub use frame::{decode_frame, encode_frame, Frame, ETX, STX, SUFFIX_LEN};
pub use interpret::{hex_dump, interpret, Interpretation};

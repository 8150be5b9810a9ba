//! Utilities for unidirectional channels.

use crate::*;

channel! {
    /// Unidirectional channel. The value is sampled every step and there is no backward value.
    UniChannel<V: Signal>,
    V,
    ()
}

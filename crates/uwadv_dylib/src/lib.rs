//! Forces dynamic linking of `uwadv_internal` when the `dynamic_linking` feature is enabled.

#![allow(unused_imports)]
use uwadv_internal;

// Copyright 2026 the Glyphis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

mod test_builder;
#[cfg(feature = "swash")]
mod test_scaled;
mod utils;

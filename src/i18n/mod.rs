// SPDX-License-Identifier: MPL-2.0
//! Localization with Fluent.
//!
//! Translations live in `assets/i18n/*.ftl` and are embedded in the binary.
//! The locale is picked from the `--lang` flag, the config, then the OS,
//! falling back to `en-US`. Keys missing from the active locale fall back to
//! English.

pub mod fluent;

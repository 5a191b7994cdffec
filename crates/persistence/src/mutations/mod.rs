// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations against the reporting database.

pub mod accounts;
pub mod notifications;
pub mod reports;
pub mod setup;

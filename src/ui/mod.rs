// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the annotation tool.

pub mod canvas;
pub mod dialogs;
pub mod labels;
pub mod toolbar;

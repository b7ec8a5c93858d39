// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolkit-independent canvas and geometry model.

pub mod annotation;
pub mod canvas;
pub mod project;
pub mod view;

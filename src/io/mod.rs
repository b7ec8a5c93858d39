// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations for source images, masks and the dataset directory.

pub mod dataset;
pub mod mask;
pub mod media;

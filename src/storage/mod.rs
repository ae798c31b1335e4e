//! # Storage Module
//!
//! Provides the read-only byte region the cursor walks. The input file is
//! mapped into the process address space so the tokenizer can hand out
//! `&[u8]` slices that point straight at the file's bytes: no read buffer,
//! no intermediate copy, no generic row representation.
//!
//! ## Safety Model
//!
//! The mapping is read-only and owned by [`MappedFile`]. Every field slice the
//! cursor produces borrows from `MappedFile::as_bytes(&self)`, so the borrow
//! checker guarantees no slice outlives the mapping. Dropping the
//! `MappedFile` unmaps the file.
//!
//! External writers must not modify the file while it is mapped; this is the
//! caller's contract, as with any memory-mapped input.
//!
//! ## Backings
//!
//! | Backing | Created by | Notes |
//! |---------|------------|-------|
//! | Mapped | `MappedFile::open` | `memmap2::Mmap`, sequential access advice on unix |
//! | Owned | `MappedFile::from_bytes` | in-memory input, used by tests and fuzzing |
//! | Empty | `open` on a zero-length file | zero-length files cannot be mapped |
//!
//! ## Platform Support
//!
//! Uses the `memmap2` crate (mmap on Linux/macOS, MapViewOfFile on Windows).

mod mmap;

pub use mmap::MappedFile;

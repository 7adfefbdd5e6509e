// Pipeline stages — each consumes the previous stage's file and writes
// its own. Stages run to completion before the next begins; the files
// are the only channel between them.

pub mod aggregate;
pub mod classify;
pub mod collect;

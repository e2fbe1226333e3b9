//! byte-table: a thread-safe, insertion-ordered table keyed by raw byte
//! strings.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small shared lookup primitive for multi-threaded servers that
//!   key peers, sessions, and attributes by arbitrary byte strings, built in
//!   verifiable layers so each piece can be reasoned about independently.
//! - Layers:
//!   - OrderList<V, S>: single-threaded structural layer. Entry storage in a
//!     slotmap (stable, generational ids), an intrusive doubly-linked list
//!     threading the entries in insertion order, and a hash index from key
//!     bytes to the ids sharing that key.
//!   - Table<V, S>: public API. Wraps OrderList in a mutex; every operation
//!     is one scoped acquisition, released on all exit paths. Exposes
//!     `Cursor`, a small `Copy` wrapper over the generational id.
//!
//! Key and value ownership
//! - The table owns its keys: `insert` takes a `Box<[u8]>` (or anything
//!   convertible) and frees it when the entry is extracted or the table is
//!   dropped. Keys are raw byte sequences; length is authoritative and two
//!   keys are equal iff their bytes are equal.
//! - Values are owned `V`: moved in on insert, cloned out on `read`, moved
//!   back out on `extract`. Callers that want shared values store an `Arc`.
//!
//! Duplicate keys
//! - `insert` never rejects a key already present; the table may hold several
//!   entries with the same key. `read` and `extract` resolve to the first
//!   match in enumeration order (the oldest surviving duplicate). Do not rely
//!   on uniqueness the table does not enforce.
//!
//! Enumeration
//! - `snapshot()` copies the whole enumeration under one lock acquisition and
//!   is the recommended mode: the result is an immutable sequence that cannot
//!   race with later mutation.
//! - `first`/`next` hold the lock for a single step only. A cursor is backed
//!   by a generational id, so a cursor whose entry was extracted resolves to
//!   `None` from `next`, `get`, and `with_entry` rather than to stale memory.
//!   Cursor enumeration is not restartable under concurrent mutation: another
//!   thread may extract the cursor's entry between steps, ending the walk
//!   early.
//!
//! Locking discipline
//! - One table-wide mutex, no reader/writer split. Operations on one table
//!   are linearizable in lock-acquisition order. Critical sections are short
//!   and never call user code (`V::clone`, the `read_with`/`with_entry`
//!   closures) while the structure is transiently inconsistent, so a lock
//!   poisoned by a panic in user code still guards a sound structure and is
//!   safely reclaimed.
//! - No operation re-enters the lock. A `read_with`/`with_entry` closure must
//!   not call back into the same table; doing so deadlocks.
//!
//! Notes and non-goals
//! - No persistence, no resharding policy, no cross-process sharing.
//! - The table does not run user destructors beyond normal Rust drop.
//! - Public API surface is `Table` and `Cursor`; the structural layer is an
//!   implementation detail.

mod order_list;
mod table;

// Public surface
pub use table::{Cursor, Table};

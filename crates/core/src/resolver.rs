//! Nested container field resolution
//!
//! Finds a data field by id or by name when it may live inside container
//! (structured) fields instead of at the top level of a scope.
//!
//! # Algorithm
//!
//! Depth-first, pre-order, guided by an optional path of container ids:
//!
//! 1. If the target is directly in the current map, return it.
//! 2. Otherwise walk the map's containers in map order (id order for the id
//!    search, name order for the name search). Descend into a container when
//!    the path has no entry for the current depth, or when that entry equals
//!    the container's id. The first descent that finds the target wins.
//! 3. Otherwise the target is not under this map.
//!
//! An empty path matches every container at every depth. A non-empty path
//! pins depth `d` to the container `path[d]`, and only while `d` is inside
//! the path: deeper levels fall back to matching any container. A path that
//! is shorter than the real nesting therefore does not fail on its own.
//!
//! ```text
//! common
//!  ├── 1  "a"            find_by_id(20, [])     -> X  (wildcard descent)
//!  └── 10 "c"  [C]       find_by_id(20, [10])   -> X
//!       └── 20 "x"  X    find_by_id(20, [11])   -> None
//! ```
//!
//! Searching is read-only and never reports diagnostics itself; the table
//! decides how loudly to report a miss after all scopes were tried.

use tdi_sdk::TdiId;

use crate::info::{DataFieldInfo, DataFieldMap};

/// Whether the search may descend into `container_id` at `depth`
#[inline]
fn path_allows(path: &[TdiId], depth: usize, container_id: TdiId) -> bool {
    path.get(depth).map_or(true, |&id| id == container_id)
}

/// Find a field by id in `map` or below, guided by `path`
pub fn find_by_id<'a>(
    field_id: TdiId,
    map: &'a DataFieldMap,
    path: &[TdiId],
) -> Option<&'a DataFieldInfo> {
    find_by_id_from(field_id, map, path, 0)
}

/// Find a field by id starting at `depth` of `path`
pub fn find_by_id_from<'a>(
    field_id: TdiId,
    map: &'a DataFieldMap,
    path: &[TdiId],
    depth: usize,
) -> Option<&'a DataFieldInfo> {
    if let Some(field) = map.get(field_id) {
        return Some(field);
    }

    map.iter()
        .filter(|field| path_allows(path, depth, field.id()))
        .filter_map(|field| field.container_map())
        .find_map(|nested| find_by_id_from(field_id, nested, path, depth + 1))
}

/// Find a field by name in `map` or below, guided by `path`
pub fn find_by_name<'a>(
    name: &str,
    map: &'a DataFieldMap,
    path: &[TdiId],
) -> Option<&'a DataFieldInfo> {
    find_by_name_from(name, map, path, 0)
}

/// Find a field by name starting at `depth` of `path`
pub fn find_by_name_from<'a>(
    name: &str,
    map: &'a DataFieldMap,
    path: &[TdiId],
    depth: usize,
) -> Option<&'a DataFieldInfo> {
    if let Some(field) = map.get_by_name(name) {
        return Some(field);
    }

    map.iter_by_name()
        .filter(|field| path_allows(path, depth, field.id()))
        .filter_map(|field| field.container_map())
        .find_map(|nested| find_by_name_from(name, nested, path, depth + 1))
}

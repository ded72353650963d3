//! Watch target registrar
//!
//! Opens each requested path and binds it to the notification facility.
//! Startup registration is all-or-nothing for the caller: the first failure
//! releases whatever was already bound and is returned, so the dispatch loop
//! never starts on a partial set.

use std::fs::File;
use std::path::Path;

use crate::domain::entities::{WatchSet, WatchTarget};
use crate::domain::ports::Notifier;
use crate::domain::value_objects::WatchHandle;
use crate::error::{WatchrunError, WatchrunResult};

/// Open `path` and subscribe to changes of the object behind it.
pub fn register<N: Notifier + ?Sized>(notifier: &mut N, path: &str) -> WatchrunResult<WatchTarget> {
    let handle = bind(notifier, path)?;
    Ok(WatchTarget::new(path, handle))
}

/// Register every path, skipping repeats, up to `capacity` targets.
pub fn register_all<N: Notifier + ?Sized>(
    notifier: &mut N,
    paths: &[String],
    capacity: usize,
) -> WatchrunResult<WatchSet> {
    let mut set = WatchSet::with_capacity(capacity);

    for path in paths {
        if set.is_full() {
            break;
        }
        if set.contains_path(path) {
            continue;
        }
        match register(notifier, path) {
            Ok(target) => {
                set.insert(target);
            }
            Err(err) => {
                release(notifier, &set);
                return Err(err);
            }
        }
    }

    Ok(set)
}

/// Bind the object currently at `path`.
pub(crate) fn bind<N: Notifier + ?Sized>(notifier: &mut N, path: &str) -> WatchrunResult<WatchHandle> {
    // The probe descriptor is closed right away: an open descriptor keeps a
    // deleted inode alive and delays its delete notification.
    File::open(path).map_err(|err| WatchrunError::from_open(path, err))?;
    notifier.register(Path::new(path))
}

fn release<N: Notifier + ?Sized>(notifier: &mut N, set: &WatchSet) {
    for handle in set.iter().filter_map(|t| t.handle()) {
        notifier.unregister(handle);
    }
}

use crate::{Error, Result};

/// A local copy of something kept in the store, changed one operation at a time.
///
/// A change starts by checking out a copy, which is only possible once the
/// snapshot has loaded and no other change is in flight. The copy comes back
/// through [`Snapshot::commit`]: it replaces the snapshot on success and the
/// previous value is kept on failure.
#[derive(Debug, Clone)]
pub enum Snapshot<T> {
    Loading,
    Loaded(T),
    Saving(T),
    Failed(Error),
}

impl<T: Clone> Snapshot<T> {
    /// Stores the result of loading the snapshot.
    ///
    /// Ignored while a change is being saved.
    pub fn load(&mut self, result: Result<T>) {
        if let Snapshot::Saving(_) = self {
            log::warn!("Ignoring load while a change is being saved");
            return;
        }

        *self = match result {
            Ok(value) => Snapshot::Loaded(value),
            Err(error) => Snapshot::Failed(error),
        };
    }

    /// The current value, if loaded.
    pub fn get(&self) -> Option<&T> {
        match self {
            Snapshot::Loaded(value) | Snapshot::Saving(value) => Some(value),
            Snapshot::Loading | Snapshot::Failed(_) => None,
        }
    }

    /// Whether a change can be checked out.
    pub fn is_ready(&self) -> bool {
        matches!(self, Snapshot::Loaded(_))
    }

    /// Starts a change, returning the copy to apply it to.
    pub fn checkout(&mut self) -> Result<T> {
        match self {
            Snapshot::Loaded(value) => {
                let copy = value.clone();
                *self = Snapshot::Saving(value.clone());

                Ok(copy)
            }
            Snapshot::Loading | Snapshot::Saving(_) => Err(Error::Busy),
            Snapshot::Failed(error) => Err(error.clone()),
        }
    }

    /// Finishes the change started by the last [`Snapshot::checkout`].
    pub fn commit(&mut self, result: Result<T>) -> Result<()> {
        let Snapshot::Saving(previous) = self else {
            log::warn!("Ignoring a change that was never checked out");
            return result.map(|_| ());
        };

        match result {
            Ok(value) => {
                *self = Snapshot::Loaded(value);

                Ok(())
            }
            Err(error) => {
                *self = Snapshot::Loaded(previous.clone());

                Err(error)
            }
        }
    }
}

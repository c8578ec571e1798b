// Snapshot management for stepping through a finished run

use crate::memory::Memory;

/// Execution state just before one instruction ran
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub memory: Memory,
    pub pointer: usize,
    /// Instruction about to execute; None for the final state
    pub instruction_index: Option<usize>,
    /// Length of the output transcript at this point
    pub output_len: usize,
    /// Number of runtime diagnostics recorded so far
    pub error_count: usize,
    /// Open loop frames
    pub loop_depth: usize,
}

impl Snapshot {
    /// Estimate the memory usage of this snapshot in bytes
    pub fn estimated_size(&self) -> usize {
        std::mem::size_of::<Snapshot>() + self.memory.estimated_size()
    }
}

/// Bounded execution history
#[derive(Debug)]
pub struct SnapshotManager {
    snapshots: Vec<Snapshot>,
    max_memory: usize,
    current_memory: usize,
    truncated: bool,
}

impl SnapshotManager {
    pub fn new(max_memory: usize) -> Self {
        SnapshotManager {
            snapshots: Vec::new(),
            max_memory,
            current_memory: 0,
            truncated: false,
        }
    }

    /// Add a snapshot to history.
    ///
    /// Once a snapshot is rejected for exceeding the budget the history is
    /// marked truncated and every later push is rejected too, so the
    /// recorded steps stay contiguous.
    pub fn push(&mut self, snapshot: Snapshot) -> Result<(), String> {
        if self.truncated {
            return Err("Snapshot history is truncated".to_string());
        }

        let snapshot_size = snapshot.estimated_size();
        if self.current_memory + snapshot_size > self.max_memory {
            self.truncated = true;
            return Err(format!(
                "Snapshot memory limit exceeded: {} + {} > {}",
                self.current_memory, snapshot_size, self.max_memory
            ));
        }

        self.current_memory += snapshot_size;
        self.snapshots.push(snapshot);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    pub fn last(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Whether recording stopped before the run ended
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Get current memory usage
    pub fn memory_usage(&self) -> usize {
        self.current_memory
    }

    /// Get max memory limit
    pub fn memory_limit(&self) -> usize {
        self.max_memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(cells: usize) -> Snapshot {
        Snapshot {
            memory: Memory::new(cells),
            pointer: 0,
            instruction_index: Some(0),
            output_len: 0,
            error_count: 0,
            loop_depth: 0,
        }
    }

    #[test]
    fn test_push_within_budget() {
        let mut manager = SnapshotManager::new(1024 * 1024);
        manager.push(snapshot(4)).unwrap();
        manager.push(snapshot(4)).unwrap();

        assert_eq!(manager.len(), 2);
        assert_eq!(manager.memory_usage(), 2 * snapshot(4).estimated_size());
        assert!(!manager.is_truncated());
    }

    #[test]
    fn test_budget_exceeded_truncates() {
        let size = snapshot(8).estimated_size();
        let mut manager = SnapshotManager::new(size * 2 + size / 2);

        assert!(manager.push(snapshot(8)).is_ok());
        assert!(manager.push(snapshot(8)).is_ok());
        assert!(manager.push(snapshot(8)).is_err());
        assert!(manager.is_truncated());

        // A smaller snapshot would fit, but the history stays contiguous
        assert!(manager.push(snapshot(0)).is_err());
        assert_eq!(manager.len(), 2);
    }
}

//! One-shot task scheduling.
//!
//! The scheduler defers task execution to a specific time. It is the
//! primitive behind debounced filter input: rescheduling a task replaces its
//! pending execution, so of several rapid submissions only the last one runs.
//!
//! The scheduler never spawns a thread; the host drives it by calling
//! [`TaskScheduler::process_ready`] (typically from its event loop, using
//! [`TaskScheduler::time_until_next`] to sleep the right amount).

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};

use crate::error::{Error, Result};

new_key_type! {
    /// A unique identifier for a scheduled task.
    pub struct ScheduledTaskId;
}

/// A boxed task closure.
type BoxedTask = Box<dyn FnMut() + Send + 'static>;

/// Internal scheduled task data.
struct TaskData {
    /// When this task should execute.
    run_at: Instant,
    /// Whether this task is still pending.
    active: bool,
    /// The task closure to execute.
    task: BoxedTask,
}

/// An entry in the scheduler queue (min-heap by execution time).
#[derive(Debug, Clone, Copy)]
struct QueueEntry {
    id: ScheduledTaskId,
    run_time: Instant,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.run_time == other.run_time
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap (BinaryHeap is max-heap by default).
        other.run_time.cmp(&self.run_time)
    }
}

/// Manages one-shot scheduled tasks.
///
/// The scheduler maintains a priority queue of tasks ordered by execution
/// time. A task can be cancelled or rescheduled while pending; rescheduling
/// leaves the old queue entry in place and marks it stale, so only the most
/// recent schedule of a task ever runs.
pub struct TaskScheduler {
    /// All registered tasks.
    tasks: SlotMap<ScheduledTaskId, TaskData>,
    /// Priority queue of pending executions (min-heap by run time).
    queue: BinaryHeap<QueueEntry>,
}

impl TaskScheduler {
    /// Create a new task scheduler.
    pub fn new() -> Self {
        Self {
            tasks: SlotMap::with_key(),
            queue: BinaryHeap::new(),
        }
    }

    /// Schedule a task to execute after the specified delay.
    ///
    /// Returns the task ID that can be used to cancel or reschedule the task.
    pub fn schedule_once<F>(&mut self, delay: Duration, task: F) -> ScheduledTaskId
    where
        F: FnMut() + Send + 'static,
    {
        self.schedule_at(Instant::now() + delay, task)
    }

    /// Schedule a task to execute at a specific instant.
    ///
    /// If the instant is in the past, the task will execute on the next
    /// call to [`process_ready`](Self::process_ready).
    pub fn schedule_at<F>(&mut self, instant: Instant, task: F) -> ScheduledTaskId
    where
        F: FnMut() + Send + 'static,
    {
        let data = TaskData {
            run_at: instant,
            active: true,
            task: Box::new(task),
        };

        let id = self.tasks.insert(data);
        self.queue.push(QueueEntry {
            id,
            run_time: instant,
        });

        id
    }

    /// Cancel and remove a pending task.
    ///
    /// Returns `Ok(())` if the task was found and cancelled.
    pub fn cancel(&mut self, id: ScheduledTaskId) -> Result<()> {
        if let Some(task) = self.tasks.get_mut(id) {
            task.active = false;
            self.tasks.remove(id);
            Ok(())
        } else {
            Err(Error::InvalidTaskId)
        }
    }

    /// Reschedule a pending task with a new delay from now.
    ///
    /// The previous execution time is abandoned: its queue entry becomes
    /// stale and is skipped when processed. This is the "latest write wins"
    /// behavior debouncing relies on.
    pub fn reschedule(&mut self, id: ScheduledTaskId, delay: Duration) -> Result<()> {
        if let Some(task) = self.tasks.get_mut(id) {
            task.run_at = Instant::now() + delay;
            self.queue.push(QueueEntry {
                id,
                run_time: task.run_at,
            });
            Ok(())
        } else {
            Err(Error::InvalidTaskId)
        }
    }

    /// Check if a scheduled task is still pending.
    pub fn is_active(&self, id: ScheduledTaskId) -> bool {
        self.tasks.get(id).is_some_and(|t| t.active)
    }

    /// Get the duration until the next task should execute, if any.
    ///
    /// Returns `None` if there are no pending tasks.
    pub fn time_until_next(&mut self) -> Option<Duration> {
        self.drop_stale_front();
        self.queue.peek().map(|entry| {
            let now = Instant::now();
            if entry.run_time > now {
                entry.run_time - now
            } else {
                Duration::ZERO
            }
        })
    }

    /// Process all tasks whose time has come.
    ///
    /// Returns the number of tasks that were executed.
    #[tracing::instrument(skip(self), target = "enhanced_select_core::scheduler", level = "trace")]
    pub fn process_ready(&mut self) -> usize {
        let now = Instant::now();
        let mut executed_count = 0;

        while let Some(entry) = self.queue.peek() {
            if entry.run_time > now {
                break;
            }

            let Some(entry) = self.queue.pop() else {
                break;
            };
            let id = entry.id;

            let Some(task_data) = self.tasks.get_mut(id) else {
                continue;
            };

            if !task_data.active {
                continue;
            }

            // Skip stale queue entries from a reschedule: if the entry's run
            // time doesn't match the task's current run_at, a newer entry
            // for this task exists further down the queue.
            if entry.run_time != task_data.run_at {
                continue;
            }

            tracing::trace!(target: "enhanced_select_core::scheduler", ?id, "executing scheduled task");
            (task_data.task)();
            executed_count += 1;

            task_data.active = false;
            self.tasks.remove(id);
        }

        executed_count
    }

    /// Get the number of pending tasks.
    pub fn active_count(&self) -> usize {
        self.tasks.iter().filter(|(_, t)| t.active).count()
    }

    /// Check if there is any task ready to execute now.
    pub fn has_ready(&mut self) -> bool {
        self.drop_stale_front();
        self.queue
            .peek()
            .is_some_and(|entry| entry.run_time <= Instant::now())
    }

    /// Pop cancelled and stale entries off the front of the queue.
    fn drop_stale_front(&mut self) {
        while let Some(entry) = self.queue.peek() {
            let live = self
                .tasks
                .get(entry.id)
                .is_some_and(|t| t.active && t.run_at == entry.run_time);
            if live {
                break;
            }
            self.queue.pop();
        }
    }
}

impl Default for TaskScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// A thread-safe wrapper around `TaskScheduler`.
pub struct SharedTaskScheduler {
    inner: Mutex<TaskScheduler>,
}

impl SharedTaskScheduler {
    /// Create a new shared scheduler.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(TaskScheduler::new()),
        }
    }

    /// See [`TaskScheduler::schedule_once`].
    pub fn schedule_once<F>(&self, delay: Duration, task: F) -> ScheduledTaskId
    where
        F: FnMut() + Send + 'static,
    {
        self.inner.lock().schedule_once(delay, task)
    }

    /// See [`TaskScheduler::cancel`].
    pub fn cancel(&self, id: ScheduledTaskId) -> Result<()> {
        self.inner.lock().cancel(id)
    }

    /// See [`TaskScheduler::reschedule`].
    pub fn reschedule(&self, id: ScheduledTaskId, delay: Duration) -> Result<()> {
        self.inner.lock().reschedule(id, delay)
    }

    /// See [`TaskScheduler::is_active`].
    pub fn is_active(&self, id: ScheduledTaskId) -> bool {
        self.inner.lock().is_active(id)
    }

    /// See [`TaskScheduler::time_until_next`].
    pub fn time_until_next(&self) -> Option<Duration> {
        self.inner.lock().time_until_next()
    }

    /// See [`TaskScheduler::process_ready`].
    pub fn process_ready(&self) -> usize {
        self.inner.lock().process_ready()
    }

    /// See [`TaskScheduler::has_ready`].
    pub fn has_ready(&self) -> bool {
        self.inner.lock().has_ready()
    }
}

impl Default for SharedTaskScheduler {
    fn default() -> Self {
        Self::new()
    }
}

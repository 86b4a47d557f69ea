//! The traversal orchestrator.
//!
//! A [`Traversal`] drains its item queue one start item at a time, then runs
//! every branch queued along the way from a single shared branch queue until
//! it is empty. Branch runs never recurse on the call stack.

use std::fmt;
use std::hash::Hash;
use std::mem;
use std::rc::Rc;

use gridtrace_core::TraversalError;

use crate::actions::{BranchStartAction, StepAction};
use crate::computer::ContextValueComputer;
use crate::conditions::{QueueCondition, StopCondition};
use crate::context::StepContext;
use crate::policies::Policies;
use crate::queue::{QueueType, TraversalQueue};
use crate::tracker::RecursiveTracker;

/// Neighbour lookup supplied by the caller. Candidates are handed back
/// through the [`Queuer`].
pub type QueueNext<T> = dyn Fn(&T, &StepContext, &mut Queuer<'_, T>);

type ItemQueue<T> = Box<dyn TraversalQueue<Queued<T>>>;
type BranchQueue<T> = Box<dyn TraversalQueue<Traversal<T>>>;

/// An item waiting in the item queue, with the context computed for it.
pub(crate) struct Queued<T> {
    pub(crate) item: T,
    pub(crate) context: StepContext,
}

/// A start item. Branch start items arrive with their context already
/// derived from the item they were queued from.
struct StartItem<T> {
    item: T,
    context: Option<StepContext>,
}

impl<T: Clone> Clone for StartItem<T> {
    fn clone(&self) -> Self {
        Self {
            item: self.item.clone(),
            context: self.context.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    NotStarted,
    Running,
    Finished,
}

/// Counts over a whole run, branches included. `branches_run` counts only
/// branches that visited at least one item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraversalStats {
    pub items_visited: usize,
    pub items_stopped: usize,
    pub branches_run: usize,
}

/// Handle given to [`QueueNext`] for queuing candidates found from the
/// current item.
pub struct Queuer<'a, T> {
    item: &'a T,
    context: &'a StepContext,
    policies: &'a Policies<T>,
    queue: &'a mut ItemQueue<T>,
    branch_queue: &'a mut BranchQueue<T>,
    tracker: &'a Rc<RecursiveTracker<T>>,
    queue_type: &'a QueueType<T>,
    queue_next: &'a Rc<QueueNext<T>>,
    error: Option<TraversalError>,
}

impl<'a, T> Queuer<'a, T>
where
    T: Clone + Eq + Hash + 'static,
{
    pub fn current_item(&self) -> &T {
        self.item
    }

    pub fn current_context(&self) -> &StepContext {
        self.context
    }

    /// Queue `next_item` on this traversal. Returns false if a queue
    /// condition or the queue itself refused it.
    pub fn queue_item(&mut self, next_item: T) -> bool {
        let Some(context) = self.next_context(&next_item, false) else {
            return false;
        };
        if !self
            .policies
            .can_queue(&next_item, &context, self.item, self.context)
        {
            return false;
        }
        self.queue.add(Queued {
            item: next_item,
            context,
        })
    }

    /// Queue a new branch traversal starting at `next_item`. The branch
    /// copies every policy and never revisits anything this lineage has
    /// visited.
    pub fn queue_branch(&mut self, next_item: T) -> bool {
        let Some(context) = self.next_context(&next_item, true) else {
            return false;
        };
        if !self
            .policies
            .can_queue(&next_item, &context, self.item, self.context)
        {
            return false;
        }
        let branch = Traversal::new_branch(
            self.queue_type.clone(),
            Rc::clone(self.queue_next),
            Rc::new(RecursiveTracker::child(self.tracker)),
            self.policies.clone(),
            StartItem {
                item: next_item,
                context: Some(context),
            },
        );
        self.branch_queue.add(branch)
    }

    fn next_context(&mut self, next_item: &T, is_branch_start: bool) -> Option<StepContext> {
        if self.error.is_some() {
            return None;
        }
        match self
            .policies
            .compute_next_context(self.context, next_item, is_branch_start)
        {
            Ok(context) => Some(context),
            Err(e) => {
                self.error = Some(e);
                None
            }
        }
    }
}

/// A branching traversal over items of type `T`.
///
/// Items are identified by value: the tracker stores clones, so `T` should
/// be a cheap handle (an index, an id, a small step record).
pub struct Traversal<T> {
    queue_type: QueueType<T>,
    queue_next: Rc<QueueNext<T>>,
    queue: ItemQueue<T>,
    branch_queue: BranchQueue<T>,
    tracker: Rc<RecursiveTracker<T>>,
    policies: Policies<T>,
    start_items: Vec<StartItem<T>>,
    state: RunState,
    is_branch: bool,
}

impl<T> Traversal<T>
where
    T: Clone + Eq + Hash + 'static,
{
    pub fn new(
        queue_type: QueueType<T>,
        queue_next: impl Fn(&T, &StepContext, &mut Queuer<'_, T>) + 'static,
    ) -> Self {
        let queue = queue_type.item_queue();
        let branch_queue = queue_type.branch_queue();
        Self {
            queue_type,
            queue_next: Rc::new(queue_next),
            queue,
            branch_queue,
            tracker: Rc::new(RecursiveTracker::root()),
            policies: Policies::new(),
            start_items: Vec::new(),
            state: RunState::NotStarted,
            is_branch: false,
        }
    }

    pub fn breadth_first(
        queue_next: impl Fn(&T, &StepContext, &mut Queuer<'_, T>) + 'static,
    ) -> Self {
        Self::new(QueueType::BreadthFirst, queue_next)
    }

    pub fn depth_first(
        queue_next: impl Fn(&T, &StepContext, &mut Queuer<'_, T>) + 'static,
    ) -> Self {
        Self::new(QueueType::DepthFirst, queue_next)
    }

    fn new_branch(
        queue_type: QueueType<T>,
        queue_next: Rc<QueueNext<T>>,
        tracker: Rc<RecursiveTracker<T>>,
        policies: Policies<T>,
        start_item: StartItem<T>,
    ) -> Self {
        let queue = queue_type.item_queue();
        let branch_queue = queue_type.branch_queue();
        Self {
            queue_type,
            queue_next,
            queue,
            branch_queue,
            tracker,
            policies,
            start_items: vec![start_item],
            state: RunState::NotStarted,
            is_branch: true,
        }
    }

    // ---- Start items ----

    pub fn add_start_item(&mut self, item: T) -> &mut Self {
        self.start_items.push(StartItem {
            item,
            context: None,
        });
        self
    }

    pub fn add_start_items(&mut self, items: impl IntoIterator<Item = T>) -> &mut Self {
        for item in items {
            self.add_start_item(item);
        }
        self
    }

    pub fn clear_start_items(&mut self) -> &mut Self {
        self.start_items.clear();
        self
    }

    pub fn start_items(&self) -> impl Iterator<Item = &T> {
        self.start_items.iter().map(|start| &start.item)
    }

    // ---- Policies ----

    pub fn add_stop_condition(&mut self, condition: impl StopCondition<T> + 'static) -> &mut Self {
        self.policies.add_stop_condition(Rc::new(condition));
        self
    }

    pub fn clear_stop_conditions(&mut self) -> &mut Self {
        self.policies.clear_stop_conditions();
        self
    }

    pub fn copy_stop_conditions(&mut self, other: &Traversal<T>) -> &mut Self {
        self.policies.copy_stop_conditions(&other.policies);
        self
    }

    pub fn add_queue_condition(
        &mut self,
        condition: impl QueueCondition<T> + 'static,
    ) -> &mut Self {
        self.policies.add_queue_condition(Rc::new(condition));
        self
    }

    pub fn clear_queue_conditions(&mut self) -> &mut Self {
        self.policies.clear_queue_conditions();
        self
    }

    pub fn copy_queue_conditions(&mut self, other: &Traversal<T>) -> &mut Self {
        self.policies.copy_queue_conditions(&other.policies);
        self
    }

    pub fn add_step_action(&mut self, action: impl StepAction<T> + 'static) -> &mut Self {
        self.policies.add_step_action(Rc::new(action));
        self
    }

    pub fn clear_step_actions(&mut self) -> &mut Self {
        self.policies.clear_step_actions();
        self
    }

    pub fn copy_step_actions(&mut self, other: &Traversal<T>) -> &mut Self {
        self.policies.copy_step_actions(&other.policies);
        self
    }

    pub fn add_branch_start_action(
        &mut self,
        action: impl BranchStartAction<T> + 'static,
    ) -> &mut Self {
        self.policies.add_branch_start_action(Rc::new(action));
        self
    }

    pub fn clear_branch_start_actions(&mut self) -> &mut Self {
        self.policies.clear_branch_start_actions();
        self
    }

    pub fn copy_branch_start_actions(&mut self, other: &Traversal<T>) -> &mut Self {
        self.policies.copy_branch_start_actions(&other.policies);
        self
    }

    pub fn add_context_value_computer(
        &mut self,
        computer: impl ContextValueComputer<T> + 'static,
    ) -> &mut Self {
        self.policies.add_computer(Rc::new(computer));
        self
    }

    /// Removes standalone computers. Computers contributed by conditions and
    /// actions stay until their category is cleared.
    pub fn clear_context_value_computers(&mut self) -> &mut Self {
        self.policies.clear_computers();
        self
    }

    pub fn copy_context_value_computers(&mut self, other: &Traversal<T>) -> &mut Self {
        self.policies.copy_computers(&other.policies);
        self
    }

    /// Keys of every registered context value computer.
    pub fn context_value_keys(&self) -> impl Iterator<Item = &str> {
        self.policies.computer_keys()
    }

    // ---- Lifecycle ----

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_branch(&self) -> bool {
        self.is_branch
    }

    /// Run the traversal and every branch it spawns to completion.
    ///
    /// When `can_stop_on_start_item` is false, stop conditions are not
    /// applied to the first item visited. Branches always allow it.
    #[must_use = "a traversal that failed to run reports why in the error"]
    pub fn run(&mut self, can_stop_on_start_item: bool) -> Result<TraversalStats, TraversalError> {
        match self.state {
            RunState::Running => return Err(TraversalError::AlreadyRunning),
            RunState::Finished => return Err(TraversalError::AlreadyRun),
            RunState::NotStarted => {}
        }

        self.state = RunState::Running;
        tracing::debug!(
            start_items = self.start_items.len(),
            is_branch = self.is_branch,
            "Traversal started"
        );

        let result = self.run_lineage(can_stop_on_start_item);
        self.state = RunState::Finished;

        if let Ok(stats) = &result {
            tracing::debug!(
                items_visited = stats.items_visited,
                items_stopped = stats.items_stopped,
                branches_run = stats.branches_run,
                "Traversal finished"
            );
        }
        result
    }

    /// Clear queues and the visited set so the traversal can run again.
    /// Clearing the visited set also clears every ancestor's.
    pub fn reset(&mut self) -> Result<(), TraversalError> {
        if self.state == RunState::Running {
            return Err(TraversalError::AlreadyRunning);
        }
        self.queue.clear();
        self.branch_queue.clear();
        self.tracker.clear();
        self.state = RunState::NotStarted;
        Ok(())
    }

    fn run_lineage(&mut self, can_stop_on_start_item: bool) -> Result<TraversalStats, TraversalError> {
        let mut stats = TraversalStats::default();
        let mut branch_queue = mem::replace(&mut self.branch_queue, self.queue_type.branch_queue());

        let outcome = self
            .traverse(can_stop_on_start_item, &mut branch_queue, &mut stats)
            .and_then(|()| {
                while let Some(mut branch) = branch_queue.next() {
                    tracing::trace!(
                        queued_branches = branch_queue.len(),
                        "Running branch"
                    );
                    let visited_before = stats.items_visited;
                    branch.state = RunState::Running;
                    let branch_result = branch.traverse(true, &mut branch_queue, &mut stats);
                    branch.state = RunState::Finished;
                    branch_result?;
                    // A branch whose start item the lineage already visited did nothing.
                    if stats.items_visited > visited_before {
                        stats.branches_run += 1;
                    }
                }
                Ok(())
            });

        branch_queue.clear();
        self.branch_queue = branch_queue;
        outcome.map(|()| stats)
    }

    /// Drain the item queue one start item at a time.
    fn traverse(
        &mut self,
        can_stop_on_start_item: bool,
        branch_queue: &mut BranchQueue<T>,
        stats: &mut TraversalStats,
    ) -> Result<(), TraversalError> {
        let queue_next = Rc::clone(&self.queue_next);
        let mut can_stop = can_stop_on_start_item;

        for start in self.start_items.clone() {
            let context = match start.context {
                Some(context) => context,
                None => {
                    if !self.policies.can_queue_start_item(&start.item) {
                        continue;
                    }
                    self.policies.compute_initial_context(&start.item)
                }
            };
            self.queue.add(Queued {
                item: start.item,
                context,
            });

            while let Some(Queued { item, mut context }) = self.queue.next() {
                if !self.tracker.visit(&item) {
                    continue;
                }
                stats.items_visited += 1;

                let stopping = can_stop && self.policies.matches_any_stop_condition(&item, &context);
                can_stop = true;
                context.mark_stopping(stopping);

                if context.is_branch_start_item() {
                    self.policies.apply_branch_start_actions(&item, &context);
                }
                self.policies.apply_step_actions(&item, &context);

                if stopping {
                    stats.items_stopped += 1;
                    continue;
                }

                let mut queuer = Queuer {
                    item: &item,
                    context: &context,
                    policies: &self.policies,
                    queue: &mut self.queue,
                    branch_queue: &mut *branch_queue,
                    tracker: &self.tracker,
                    queue_type: &self.queue_type,
                    queue_next: &queue_next,
                    error: None,
                };
                queue_next(&item, &context, &mut queuer);
                if let Some(e) = queuer.error {
                    return Err(e);
                }
            }
        }
        Ok(())
    }
}

impl<T> fmt::Debug for Traversal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Traversal")
            .field("queue_type", &self.queue_type)
            .field("state", &self.state)
            .field("is_branch", &self.is_branch)
            .field("start_items", &self.start_items.len())
            .field("queued", &self.queue.len())
            .field("stop_conditions", &self.policies.stop_conditions.len())
            .field("queue_conditions", &self.policies.queue_conditions.len())
            .field("step_actions", &self.policies.step_actions.len())
            .field("branch_start_actions", &self.policies.branch_start_actions.len())
            .finish()
    }
}

use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub u64);

#[derive(Debug, Default)]
pub struct TaskSeq {
    next: u64,
}

impl TaskSeq {
    pub fn next_id(&mut self) -> TaskId {
        let id = TaskId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    /// Login or registration submission.
    Credentials,
    /// Pause on the success screen.
    SuccessDelay,
    /// `GET /me` (restore, post-login, or pre-flight).
    SessionCheck,
    /// Inspecting a candidate file on disk.
    FileLoad,
    /// Analysis submission.
    Analysis,
}

impl TaskKind {
    pub const ALL: [TaskKind; 5] = [
        TaskKind::Credentials,
        TaskKind::SuccessDelay,
        TaskKind::SessionCheck,
        TaskKind::FileLoad,
        TaskKind::Analysis,
    ];
}

#[derive(Debug, Clone)]
pub struct TaskStarted {
    pub id: TaskId,
    pub cancel: Option<CancellationToken>,
}

#[derive(Debug)]
pub struct TaskCompleted<E> {
    pub id: TaskId,
    pub result: E,
}

/// Task lifecycle state (stored in AppState, mutated only by reducer).
///
/// The reducer marks a task active when it emits the effect, so a result
/// whose id no longer matches (superseded, or cleared by logout) is stale.
#[derive(Debug, Default, Clone)]
pub struct TaskState {
    pub active: Option<TaskId>,
    pub cancel: Option<CancellationToken>,
}

impl TaskState {
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn begin(&mut self, id: TaskId) {
        self.active = Some(id);
        self.cancel = None;
    }

    /// Records the cancel token once the runtime has spawned the task.
    pub fn on_started(&mut self, started: &TaskStarted) {
        if self.active == Some(started.id) {
            self.cancel.clone_from(&started.cancel);
        }
    }

    pub fn finish_if_active(&mut self, id: TaskId) -> bool {
        let ok = self.active == Some(id);
        if ok {
            self.clear();
        }
        ok
    }

    pub fn clear(&mut self) {
        self.active = None;
        self.cancel = None;
    }
}

#[derive(Debug, Default, Clone)]
pub struct Tasks {
    pub credentials: TaskState,
    pub success_delay: TaskState,
    pub session_check: TaskState,
    pub file_load: TaskState,
    pub analysis: TaskState,
}

impl Tasks {
    pub fn state(&self, kind: TaskKind) -> &TaskState {
        match kind {
            TaskKind::Credentials => &self.credentials,
            TaskKind::SuccessDelay => &self.success_delay,
            TaskKind::SessionCheck => &self.session_check,
            TaskKind::FileLoad => &self.file_load,
            TaskKind::Analysis => &self.analysis,
        }
    }

    pub fn state_mut(&mut self, kind: TaskKind) -> &mut TaskState {
        match kind {
            TaskKind::Credentials => &mut self.credentials,
            TaskKind::SuccessDelay => &mut self.success_delay,
            TaskKind::SessionCheck => &mut self.session_check,
            TaskKind::FileLoad => &mut self.file_load,
            TaskKind::Analysis => &mut self.analysis,
        }
    }

    pub fn is_any_running(&self) -> bool {
        TaskKind::ALL.iter().any(|kind| self.state(*kind).is_running())
    }
}

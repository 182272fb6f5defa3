//! Filter resolution for task listings
//!
//! Decides which server-side filter string a `tasks` invocation sends.
//! Boolean flags carry whether the caller set them explicitly, because
//! `--today` defaults to true and an explicit choice must be told apart
//! from that default.

/// The `today | overdue` query sent by default
pub const TODAY_FILTER: &str = "today | overdue";

/// The query sent for `--overdue`
pub const OVERDUE_FILTER: &str = "overdue";

/// A boolean flag paired with whether the caller set it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flag {
    pub value: bool,
    pub explicit: bool,
}

impl Flag {
    /// A flag left at its default value
    pub fn unset(default: bool) -> Self {
        Self {
            value: default,
            explicit: false,
        }
    }

    /// A flag the caller set explicitly
    pub fn set(value: bool) -> Self {
        Self {
            value,
            explicit: true,
        }
    }

    /// Builds a flag from an optional parsed argument
    pub fn from_arg(arg: Option<bool>, default: bool) -> Self {
        match arg {
            Some(value) => Self::set(value),
            None => Self::unset(default),
        }
    }
}

/// Flags that influence which filter is sent to the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterFlags {
    pub filter: String,
    pub today: Flag,
    pub overdue: Flag,
    pub all: Flag,
    pub project: Option<String>,
}

impl Default for FilterFlags {
    fn default() -> Self {
        Self {
            filter: String::new(),
            today: Flag::unset(true),
            overdue: Flag::unset(false),
            all: Flag::unset(false),
            project: None,
        }
    }
}

impl FilterFlags {
    /// Returns true if a non-empty project name was given
    pub fn has_project(&self) -> bool {
        self.project.as_deref().is_some_and(|p| !p.is_empty())
    }

    /// Resolves the filter string; empty means "all active tasks"
    pub fn resolve(&self) -> String {
        if !self.filter.is_empty() {
            return self.filter.clone();
        }

        let mut today = self.today.value;

        // A project listing shows the whole project unless a date flag was chosen
        if self.has_project()
            && !self.today.explicit
            && !self.overdue.explicit
            && !self.all.explicit
        {
            today = false;
        }

        if self.overdue.explicit {
            OVERDUE_FILTER.to_string()
        } else if self.all.explicit {
            String::new()
        } else if today {
            TODAY_FILTER.to_string()
        } else {
            String::new()
        }
    }
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Host platform facts that change how runs are cleaned up and classified.

/// Well-known NTSTATUS values a crashed Windows process exits with.
const NTSTATUS_REASONS: &[(u32, &str)] = &[
    (0x8000_0003, "STATUS_BREAKPOINT"),
    (0xC000_0005, "STATUS_ACCESS_VIOLATION"),
    (0xC000_001D, "STATUS_ILLEGAL_INSTRUCTION"),
    (0xC000_0094, "STATUS_INTEGER_DIVIDE_BY_ZERO"),
    (0xC000_00FD, "STATUS_STACK_OVERFLOW"),
    (0xC000_0135, "STATUS_DLL_NOT_FOUND"),
    (0xC000_013A, "STATUS_CONTROL_C_EXIT"),
    (0xC000_0142, "STATUS_DLL_INIT_FAILED"),
    (0xC000_0374, "STATUS_HEAP_CORRUPTION"),
    (0xC000_0409, "STATUS_STACK_BUFFER_OVERRUN"),
    (0xC000_0602, "STATUS_FAIL_FAST_EXCEPTION"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    pub windows: bool,
}

impl Platform {
    /// The platform this binary was compiled for.
    pub fn current() -> Self {
        Self {
            windows: cfg!(windows),
        }
    }

    /// Process groups can be signalled as a unit (negative pid).
    pub fn supports_process_groups(&self) -> bool {
        !self.windows
    }

    /// Translate a raw Windows exit code into its symbolic name.
    ///
    /// Always `None` off Windows, where exit codes are plain small integers.
    pub fn exit_reason(&self, code: i32) -> Option<&'static str> {
        if !self.windows {
            return None;
        }
        let raw = code as u32;
        NTSTATUS_REASONS
            .iter()
            .find(|(status, _)| *status == raw)
            .map(|(_, name)| *name)
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::current()
    }
}

#[cfg(test)]
#[path = "platform_tests.rs"]
mod tests;

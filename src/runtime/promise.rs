//! Promise state
//!
//! A promise here is only a settled-or-not cell. Nothing schedules
//! reactions; inspecting a promise never waits for it.

use crate::value::Value;

/// Promise state
#[derive(Debug, Clone)]
pub enum PromiseState {
    Pending,
    Fulfilled(Value),
    Rejected(Value),
}

/// JavaScript Promise
#[derive(Debug, Clone)]
pub struct Promise {
    state: PromiseState,
}

impl Promise {
    /// `new Promise(() => {})`
    pub fn pending() -> Self {
        Promise {
            state: PromiseState::Pending,
        }
    }

    /// `Promise.resolve(value)`
    pub fn resolved(value: Value) -> Self {
        Promise {
            state: PromiseState::Fulfilled(value),
        }
    }

    /// `Promise.reject(reason)`
    pub fn rejected(reason: Value) -> Self {
        Promise {
            state: PromiseState::Rejected(reason),
        }
    }

    #[inline]
    pub fn state(&self) -> &PromiseState {
        &self.state
    }

    #[inline]
    pub fn is_settled(&self) -> bool {
        !matches!(self.state, PromiseState::Pending)
    }

    /// Fulfill a pending promise; returns false if already settled
    pub fn resolve(&mut self, value: Value) -> bool {
        self.settle(PromiseState::Fulfilled(value))
    }

    /// Reject a pending promise; returns false if already settled
    pub fn reject(&mut self, reason: Value) -> bool {
        self.settle(PromiseState::Rejected(reason))
    }

    fn settle(&mut self, state: PromiseState) -> bool {
        if self.is_settled() {
            return false;
        }
        self.state = state;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settles_once() {
        let mut p = Promise::pending();
        assert!(!p.is_settled());

        assert!(p.resolve(Value::string("非同期処理完了")));
        assert!(p.is_settled());
        assert!(!p.reject(Value::string("late")));

        match p.state() {
            PromiseState::Fulfilled(v) => assert_eq!(v.as_str(), Some("非同期処理完了")),
            other => panic!("unexpected state {:?}", other),
        }
    }

    #[test]
    fn test_constructors() {
        assert!(Promise::resolved(Value::int(1)).is_settled());
        assert!(matches!(
            Promise::rejected(Value::null()).state(),
            PromiseState::Rejected(_)
        ));
    }
}

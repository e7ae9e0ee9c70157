//! Common test fixtures

#![allow(missing_docs)]
#![allow(unreachable_pub)]
#![allow(dead_code)]

use arbor_di::{inject_tokens, AfterInit, Dependencies, Error, Inject, InjectionTokens};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc
};
use uuid::Uuid;

pub const LEAF: &str = "leaf";
pub const BRANCH: &str = "branch";
pub const TRUNK: &str = "trunk";
pub const HOOK_COUNTER: &str = "hook_counter";

/// A provider without dependencies
pub struct Leaf {
    pub id: Uuid
}

impl AfterInit for Leaf {}

impl Inject for Leaf {
    async fn inject(_: Dependencies) -> Result<Self, Error> {
        Ok(Self { id: Uuid::new_v4() })
    }
}

/// A provider depending on [`LEAF`]
pub struct Branch {
    pub id: Uuid,
    pub leaf: Arc<Leaf>
}

impl AfterInit for Branch {}

impl Inject for Branch {
    fn injection_tokens() -> InjectionTokens {
        inject_tokens![LEAF]
    }

    async fn inject(deps: Dependencies) -> Result<Self, Error> {
        Ok(Self {
            id: Uuid::new_v4(),
            leaf: deps.get(0)?
        })
    }
}

/// A provider depending on [`BRANCH`]
pub struct Trunk {
    pub id: Uuid,
    pub branch: Arc<Branch>
}

impl AfterInit for Trunk {}

impl Inject for Trunk {
    fn injection_tokens() -> InjectionTokens {
        inject_tokens![BRANCH]
    }

    async fn inject(deps: Dependencies) -> Result<Self, Error> {
        Ok(Self {
            id: Uuid::new_v4(),
            branch: deps.get(0)?
        })
    }
}

/// A provider counting its post-construction hook calls,
/// both on itself and on the shared [`HOOK_COUNTER`] constant
pub struct Hooked {
    pub id: Uuid,
    pub calls: usize,
    counter: Arc<AtomicUsize>
}

impl Inject for Hooked {
    fn injection_tokens() -> InjectionTokens {
        inject_tokens![HOOK_COUNTER]
    }

    async fn inject(deps: Dependencies) -> Result<Self, Error> {
        Ok(Self {
            id: Uuid::new_v4(),
            calls: 0,
            counter: deps.get(0)?
        })
    }
}

impl AfterInit for Hooked {
    async fn after_init(&mut self) -> Result<(), Error> {
        self.calls += 1;
        self.counter.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Counts how many times a factory ran
#[derive(Clone, Default)]
pub struct Constructions(Arc<AtomicUsize>);

impl Constructions {
    pub fn hit(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

#![allow(missing_docs)]

mod common;

use arbor_di::{inject_tokens, AfterInit, Container, Dependencies, Error, Inject, InjectionTokens, ProviderOptions};
use common::{Hooked, HOOK_COUNTER};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc
};

fn container_with_counter() -> Container {
    let container = Container::new();
    container.add_constant(HOOK_COUNTER, AtomicUsize::new(0));
    container
}

async fn hook_calls(container: &Container) -> usize {
    container
        .resolve_provider::<AtomicUsize>(HOOK_COUNTER)
        .await
        .unwrap()
        .load(Ordering::SeqCst)
}

#[tokio::test]
async fn it_runs_hook_once_per_construction() {
    let container = container_with_counter();
    container.add_provider::<Hooked>("hooked");

    let hooked = container.resolve_provider::<Hooked>("hooked").await.unwrap();

    assert_eq!(hooked.calls, 1);
    assert_eq!(hook_calls(&container).await, 1);
}

#[tokio::test]
async fn it_does_not_run_hook_on_cache_hit() {
    let container = container_with_counter();
    container.add_provider::<Hooked>("hooked");

    let first = container.resolve_provider::<Hooked>("hooked").await.unwrap();
    let second = container.resolve_provider::<Hooked>("hooked").await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.calls, 1);
    assert_eq!(hook_calls(&container).await, 1);
}

#[tokio::test]
async fn it_runs_hook_for_every_transient_instance() {
    let container = container_with_counter();
    container.add_provider_with::<Hooked>("hooked", ProviderOptions::transient());

    for _ in 0..3 {
        let hooked = container.resolve_provider::<Hooked>("hooked").await.unwrap();
        assert_eq!(hooked.calls, 1);
    }

    assert_eq!(hook_calls(&container).await, 3);
}

#[tokio::test]
async fn it_runs_hook_per_shadowing_container() {
    let root = container_with_counter();
    root.add_provider::<Hooked>("hooked");
    let child = root.create_child_container();
    child.add_provider::<Hooked>("hooked");

    root.resolve_provider::<Hooked>("hooked").await.unwrap();
    child.resolve_provider::<Hooked>("hooked").await.unwrap();
    child.resolve_provider::<Hooked>("hooked").await.unwrap();

    assert_eq!(hook_calls(&root).await, 2);
}

struct Unready {
    attempts: Arc<AtomicUsize>
}

impl Inject for Unready {
    fn injection_tokens() -> InjectionTokens {
        inject_tokens!["attempts"]
    }

    async fn inject(deps: Dependencies) -> Result<Self, Error> {
        Ok(Self { attempts: deps.get(0)? })
    }
}

impl AfterInit for Unready {
    async fn after_init(&mut self) -> Result<(), Error> {
        if self.attempts.fetch_add(1, Ordering::SeqCst) == 0 {
            Err(Error::other("not ready yet"))
        } else {
            Ok(())
        }
    }
}

#[tokio::test]
async fn it_does_not_cache_instance_when_hook_fails() {
    let container = container_with_counter();
    container.add_constant("attempts", AtomicUsize::new(0));
    container.add_provider::<Unready>("unready");

    let first = container.resolve_provider::<Unready>("unready").await;
    let second = container.resolve_provider::<Unready>("unready").await.unwrap();
    let third = container.resolve_provider::<Unready>("unready").await.unwrap();

    assert_eq!(first.err().unwrap().to_string(), "not ready yet");
    assert!(Arc::ptr_eq(&second, &third));
    assert_eq!(second.attempts.load(Ordering::SeqCst), 2);
}

struct Warmed {
    id: uuid::Uuid,
    ready: bool,
    hooks: Arc<AtomicUsize>
}

impl AfterInit for Warmed {
    async fn after_init(&mut self) -> Result<(), Error> {
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        self.hooks.fetch_add(1, Ordering::SeqCst);
        self.ready = true;
        Ok(())
    }
}

fn register_warmed(container: &Container, options: ProviderOptions) {
    container.add_hooked_factory_provider_with("warmed", [HOOK_COUNTER], options, |deps: Dependencies| async move {
        Ok::<_, Error>(Warmed {
            id: uuid::Uuid::new_v4(),
            ready: false,
            hooks: deps.get(0)?
        })
    });
}

#[tokio::test]
async fn it_awaits_suspending_hook_before_returning_instance() {
    let container = container_with_counter();
    register_warmed(&container, ProviderOptions::default());

    let warmed = container.resolve_provider::<Warmed>("warmed").await.unwrap();

    assert!(warmed.ready);
}

#[tokio::test]
async fn it_runs_hook_once_for_singleton_factory() {
    let container = container_with_counter();
    register_warmed(&container, ProviderOptions::default());

    let first = container.resolve_provider::<Warmed>("warmed").await.unwrap();
    let second = container.resolve_provider::<Warmed>("warmed").await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(hook_calls(&container).await, 1);
}

#[tokio::test]
async fn it_runs_hook_for_every_transient_factory_value() {
    let container = container_with_counter();
    register_warmed(&container, ProviderOptions::transient());

    let first = container.resolve_provider::<Warmed>("warmed").await.unwrap();
    let second = container.resolve_provider::<Warmed>("warmed").await.unwrap();

    assert_ne!(first.id, second.id);
    assert!(first.ready && second.ready);
    assert_eq!(hook_calls(&container).await, 2);
}

#[tokio::test]
async fn it_skips_hook_for_plain_factory() {
    let container = container_with_counter();
    container.add_factory_provider("warmed", [HOOK_COUNTER], |deps: Dependencies| async move {
        Ok::<_, Error>(Warmed {
            id: uuid::Uuid::new_v4(),
            ready: false,
            hooks: deps.get(0)?
        })
    });

    let warmed = container.resolve_provider::<Warmed>("warmed").await.unwrap();

    assert!(!warmed.ready);
    assert_eq!(hook_calls(&container).await, 0);
}

// tests/integration_tests.rs
mod common;

use common::{ScriptedProvider, VALID_PAGE, count};
use sitegen::{
    Orchestrator, OrchestratorError, ProviderErrorKind, ProviderRegistry, RateLimiter, output,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

fn limiter(points: u32) -> Arc<RateLimiter> {
    Arc::new(RateLimiter::new(points, Duration::from_secs(900), 1000))
}

#[tokio::test]
async fn test_falls_back_past_error_and_invalid_output() {
    let p1 = ScriptedProvider::failing("provider-1", ProviderErrorKind::EmptyResponse);
    let p2 = ScriptedProvider::ok("provider-2", "<html>too short</html>");
    let p3 = ScriptedProvider::ok("provider-3", VALID_PAGE);
    let (c1, c2, c3) = (p1.calls(), p2.calls(), p3.calls());

    let registry = ProviderRegistry::builder()
        .register("provider-3", 3, p3)
        .register("provider-1", 1, p1)
        .register("provider-2", 2, p2)
        .build()
        .unwrap();
    let orchestrator = Orchestrator::new(registry, limiter(100));

    let result = orchestrator
        .generate_website("user-1", "a bakery website with opening hours", "fullstack")
        .await
        .unwrap();

    assert_eq!(result.provider_used, "provider-3");
    assert_eq!(result.html, output::normalize(VALID_PAGE));
    assert_eq!((count(&c1), count(&c2), count(&c3)), (1, 1, 1));
}

#[tokio::test]
async fn test_first_success_wins() {
    let p1 = ScriptedProvider::ok("groq", VALID_PAGE);
    let p2 = ScriptedProvider::ok("openrouter", VALID_PAGE);
    let c2 = p2.calls();

    let registry = ProviderRegistry::builder()
        .register("groq", 1, p1)
        .register("openrouter", 2, p2)
        .build()
        .unwrap();
    let orchestrator = Orchestrator::new(registry, limiter(100));

    let result = orchestrator.generate_website("user-1", "portfolio", "portfolio").await.unwrap();
    assert_eq!(result.provider_used, "groq");
    assert_eq!(count(&c2), 0);
}

#[tokio::test]
async fn test_all_providers_failing_is_terminal() {
    let kinds = [
        ProviderErrorKind::Network,
        ProviderErrorKind::HttpStatus,
        ProviderErrorKind::Timeout,
    ];
    let mut builder = ProviderRegistry::builder();
    let mut counters = Vec::new();
    for (i, kind) in kinds.into_iter().enumerate() {
        let name = format!("provider-{}", i + 1);
        let provider = ScriptedProvider::failing(&name, kind);
        counters.push(provider.calls());
        builder = builder.register(name, i as u32 + 1, provider);
    }
    let orchestrator = Orchestrator::new(builder.build().unwrap(), limiter(100));

    let err = orchestrator
        .generate_website("user-1", "an online store", "ecommerce")
        .await
        .unwrap_err();

    assert_eq!(err, OrchestratorError::AllProvidersUnavailable);
    assert!(!err.to_string().contains("provider-"));
    assert!(counters.iter().all(|c| count(c) == 1));
}

#[tokio::test]
async fn test_unsafe_output_is_skipped() {
    let unsafe_page = VALID_PAGE.replace("</main>", "<a href=\"javascript:void(0)\">x</a></main>");
    let p1 = ScriptedProvider::ok("provider-1", &unsafe_page);
    let p2 = ScriptedProvider::ok("provider-2", VALID_PAGE);

    let registry = ProviderRegistry::builder()
        .register("provider-1", 1, p1)
        .register("provider-2", 2, p2)
        .build()
        .unwrap();
    let orchestrator = Orchestrator::new(registry, limiter(100));

    let result = orchestrator.generate_website("user-1", "a saas dashboard", "saas").await.unwrap();
    assert_eq!(result.provider_used, "provider-2");
}

#[tokio::test]
async fn test_rate_limited_request_never_calls_a_provider() {
    let provider = ScriptedProvider::ok("provider-1", VALID_PAGE);
    let calls = provider.calls();
    let registry = ProviderRegistry::builder().register("provider-1", 1, provider).build().unwrap();
    let orchestrator = Orchestrator::new(registry, limiter(0));

    let err = orchestrator
        .generate_website("user-1", "a blog about hiking", "blog")
        .await
        .unwrap_err();

    assert!(matches!(err, OrchestratorError::RateLimitExceeded { .. }));
    assert_eq!(count(&calls), 0);
}

#[tokio::test]
async fn test_budget_is_per_requester() {
    let provider = ScriptedProvider::ok("provider-1", VALID_PAGE);
    let calls = provider.calls();
    let registry = ProviderRegistry::builder().register("provider-1", 1, provider).build().unwrap();
    let orchestrator = Orchestrator::new(registry, limiter(2));

    assert!(orchestrator.generate_website("alice", "first site", "blog").await.is_ok());
    assert!(orchestrator.generate_website("alice", "second site", "blog").await.is_ok());
    assert!(orchestrator.generate_website("alice", "third site", "blog").await.is_err());
    assert!(orchestrator.generate_website("bob", "first site", "blog").await.is_ok());
    assert_eq!(count(&calls), 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_admission_admits_exactly_budget() {
    const BUDGET: u32 = 10;
    const CALLERS: usize = 64;

    let rate_limiter = limiter(BUDGET);
    let admitted = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..CALLERS)
        .map(|_| {
            let rate_limiter = rate_limiter.clone();
            let admitted = admitted.clone();
            tokio::spawn(async move {
                if rate_limiter.admit("shared-key", 1).is_ok() {
                    admitted.fetch_add(1, Ordering::SeqCst);
                }
            })
        })
        .collect();

    for result in futures::future::join_all(handles).await {
        result.unwrap();
    }

    assert_eq!(admitted.load(Ordering::SeqCst), BUDGET as usize);
    assert_eq!(rate_limiter.remaining("shared-key"), 0);
}

#[test]
fn test_concurrent_admission_across_threads() {
    const BUDGET: u32 = 25;
    const THREADS: usize = 16;
    const CALLS_PER_THREAD: usize = 10;

    let rate_limiter = limiter(BUDGET);
    let admitted = Arc::new(AtomicUsize::new(0));

    let threads: Vec<_> = (0..THREADS)
        .map(|_| {
            let rate_limiter = rate_limiter.clone();
            let admitted = admitted.clone();
            std::thread::spawn(move || {
                for _ in 0..CALLS_PER_THREAD {
                    if rate_limiter.admit("user-7", 1).is_ok() {
                        admitted.fetch_add(1, Ordering::SeqCst);
                    }
                }
            })
        })
        .collect();
    for t in threads {
        t.join().unwrap();
    }

    assert_eq!(admitted.load(Ordering::SeqCst), BUDGET as usize);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_generations_share_only_the_limiter() {
    let provider = ScriptedProvider::ok("provider-1", VALID_PAGE);
    let calls = provider.calls();
    let registry = ProviderRegistry::builder().register("provider-1", 1, provider).build().unwrap();
    let orchestrator = Arc::new(Orchestrator::new(registry, limiter(5)));

    let tasks: Vec<_> = (0..20)
        .map(|i| {
            let orchestrator = orchestrator.clone();
            tokio::spawn(async move {
                orchestrator
                    .generate_website("same-user", &format!("site number {}", i), "fullstack")
                    .await
            })
        })
        .collect();

    let outcomes: Vec<_> = futures::future::join_all(tasks)
        .await
        .into_iter()
        .map(|r| r.unwrap())
        .collect();

    let ok = outcomes.iter().filter(|r| r.is_ok()).count();
    let limited = outcomes
        .iter()
        .filter(|r| matches!(r, Err(OrchestratorError::RateLimitExceeded { .. })))
        .count();
    assert_eq!((ok, limited), (5, 15));
    assert_eq!(count(&calls), 5);
}

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-BlumiraMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Blumira MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use crate::client::SecurityApi;
use crate::domains::{build_handler, DomainHandler};
use crate::model::{Domain, UnknownDomainError};

/// Factory producing the handler for a domain on first use.
pub type HandlerFactory = Arc<dyn Fn(Domain) -> Arc<dyn DomainHandler> + Send + Sync>;

/// Maps each domain in the closed set to the factory that builds its handler.
#[derive(Clone)]
pub struct DomainRegistry {
    factory: HandlerFactory,
}

impl DomainRegistry {
    /// Registry backed by the built-in domain handlers.
    pub fn new(api: Arc<dyn SecurityApi>) -> Self {
        Self::with_factory(Arc::new(move |domain| build_handler(domain, api.clone())))
    }

    pub fn with_factory(factory: HandlerFactory) -> Self {
        Self { factory }
    }

    pub fn resolve(&self, domain: Domain) -> Arc<dyn DomainHandler> {
        (self.factory)(domain)
    }

    pub fn resolve_name(&self, name: &str) -> Result<Arc<dyn DomainHandler>, UnknownDomainError> {
        Ok(self.resolve(name.parse()?))
    }
}

impl fmt::Debug for DomainRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomainRegistry").field("domains", &Domain::names()).finish()
    }
}

/// Memoizes resolved handlers per domain; entries live for the process lifetime.
///
/// Population is lock-free with respect to the factory call: two racing callers may both
/// build a handler, and the later insert wins. Handlers are stateless so either copy is
/// equivalent.
#[derive(Debug)]
pub struct HandlerCache {
    registry: DomainRegistry,
    handlers: RwLock<HashMap<Domain, Arc<dyn DomainHandler>>>,
}

impl HandlerCache {
    pub fn new(registry: DomainRegistry) -> Self {
        Self { registry, handlers: RwLock::new(HashMap::new()) }
    }

    pub fn get_or_create(&self, domain: Domain) -> Arc<dyn DomainHandler> {
        if let Some(handler) = self.cached(domain) {
            return handler;
        }

        let handler = self.registry.resolve(domain);
        let mut handlers = match self.handlers.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        handlers.insert(domain, handler.clone());
        handler
    }

    pub fn is_cached(&self, domain: Domain) -> bool {
        self.cached(domain).is_some()
    }

    fn cached(&self, domain: Domain) -> Option<Arc<dyn DomainHandler>> {
        let handlers = match self.handlers.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        handlers.get(&domain).cloned()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::client::{ApiError, ApiRequest};

    struct NullApi;

    #[async_trait::async_trait]
    impl SecurityApi for NullApi {
        async fn send(&self, _request: ApiRequest) -> Result<serde_json::Value, ApiError> {
            Ok(serde_json::Value::Null)
        }
    }

    fn counting_registry(counter: Arc<AtomicUsize>) -> DomainRegistry {
        let api: Arc<dyn SecurityApi> = Arc::new(NullApi);
        DomainRegistry::with_factory(Arc::new(move |domain| {
            counter.fetch_add(1, Ordering::SeqCst);
            build_handler(domain, api.clone())
        }))
    }

    #[test]
    fn resolve_name_rejects_unknown_domains() {
        let registry = DomainRegistry::new(Arc::new(NullApi));
        let err = registry.resolve_name("bogus").map(|_| ()).unwrap_err();
        assert_eq!(err.requested, "bogus");
        assert_eq!(registry.resolve_name("users").unwrap().domain(), Domain::Users);
    }

    #[test]
    fn cache_resolves_each_domain_once() {
        let counter = Arc::new(AtomicUsize::new(0));
        let cache = HandlerCache::new(counting_registry(counter.clone()));

        assert!(!cache.is_cached(Domain::Findings));
        let first = cache.get_or_create(Domain::Findings);
        let second = cache.get_or_create(Domain::Findings);

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert!(cache.is_cached(Domain::Findings));
        assert!(!cache.is_cached(Domain::Msp));
    }

    #[test]
    fn concurrent_population_yields_equivalent_handlers() {
        let counter = Arc::new(AtomicUsize::new(0));
        let cache = Arc::new(HandlerCache::new(counting_registry(counter.clone())));

        let handles = (0..8)
            .map(|_| {
                let cache = cache.clone();
                std::thread::spawn(move || cache.get_or_create(Domain::Msp))
            })
            .collect::<Vec<_>>();
        let handlers =
            handles.into_iter().map(|handle| handle.join().expect("join")).collect::<Vec<_>>();

        let expected = handlers[0].tools();
        for handler in &handlers {
            assert_eq!(handler.tools(), expected);
        }
        let resolutions = counter.load(Ordering::SeqCst);
        assert!((1..=8).contains(&resolutions));
    }
}

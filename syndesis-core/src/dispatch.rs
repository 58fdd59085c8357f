//! Handler registry and dispatch
//!
//! Parsed operations are routed to registered handlers. Handlers are plain
//! callables returning a boolean "I handled this"; dispatch walks them in
//! registration order and stops at the first `true`. They are routing
//! predicates only - whatever storing or answering a value means is the
//! handler's business, not the dispatcher's.
//!
//! The lists are bounded. Registering past capacity quietly does nothing
//! (the link keeps working, earlier handlers are unaffected); the return
//! value reports whether the handler was recorded for callers that care.

use heapless::Vec;

/// Default handler capacity per operation kind
pub const MAX_HANDLERS: usize = 5;

/// Handler for get requests: key, returns whether it claimed the request
pub type GetHandler<'a> = &'a dyn Fn(&str) -> bool;

/// Handler for set requests: key and decoded value
pub type SetHandler<'a> = &'a dyn Fn(&str, u32) -> bool;

/// Handler for byte-stream set requests: key and decoded payload
pub type ByteStreamHandler<'a> = &'a dyn Fn(&str, &[u8]) -> bool;

/// Ordered, bounded handler lists for the three operation kinds
pub struct HandlerRegistry<'a, const CAP: usize = MAX_HANDLERS> {
    on_get: Vec<GetHandler<'a>, CAP>,
    on_set: Vec<SetHandler<'a>, CAP>,
    on_byte_stream: Vec<ByteStreamHandler<'a>, CAP>,
}

impl<'a, const CAP: usize> Default for HandlerRegistry<'a, CAP> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, const CAP: usize> HandlerRegistry<'a, CAP> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            on_get: Vec::new(),
            on_set: Vec::new(),
            on_byte_stream: Vec::new(),
        }
    }

    /// Register a get handler, returns false once capacity is reached
    pub fn on_get(&mut self, handler: GetHandler<'a>) -> bool {
        self.on_get.push(handler).is_ok()
    }

    /// Register a set handler, returns false once capacity is reached
    pub fn on_set(&mut self, handler: SetHandler<'a>) -> bool {
        self.on_set.push(handler).is_ok()
    }

    /// Register a byte-stream handler, returns false once capacity is reached
    pub fn on_byte_stream(&mut self, handler: ByteStreamHandler<'a>) -> bool {
        self.on_byte_stream.push(handler).is_ok()
    }

    /// Offer a get to the handlers in registration order, first `true` wins
    pub fn dispatch_get(&self, key: &str) -> bool {
        self.on_get.iter().any(|handler| handler(key))
    }

    /// Offer a set to the handlers in registration order, first `true` wins
    pub fn dispatch_set(&self, key: &str, value: u32) -> bool {
        self.on_set.iter().any(|handler| handler(key, value))
    }

    /// Offer a byte-stream set to the handlers, first `true` wins
    pub fn dispatch_byte_stream(&self, key: &str, payload: &[u8]) -> bool {
        self.on_byte_stream
            .iter()
            .any(|handler| handler(key, payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    #[test]
    fn test_dispatch_with_no_handlers() {
        let registry: HandlerRegistry = HandlerRegistry::new();
        assert!(!registry.dispatch_get("temp"));
        assert!(!registry.dispatch_set("temp", 1));
        assert!(!registry.dispatch_byte_stream("temp", &[1]));
    }

    #[test]
    fn test_first_true_wins() {
        let calls = Cell::new(0u32);
        let miss = |_: &str, _: u32| {
            calls.set(calls.get() + 1);
            false
        };
        let hit = |_: &str, _: u32| {
            calls.set(calls.get() + 1);
            true
        };
        let never = |_: &str, _: u32| {
            calls.set(calls.get() + 1);
            true
        };

        let mut registry: HandlerRegistry = HandlerRegistry::new();
        assert!(registry.on_set(&miss));
        assert!(registry.on_set(&hit));
        assert!(registry.on_set(&never));

        assert!(registry.dispatch_set("temp", 72));
        // The scan stopped at the second handler
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_all_handlers_decline() {
        let miss = |_: &str| false;
        let mut registry: HandlerRegistry = HandlerRegistry::new();
        registry.on_get(&miss);
        registry.on_get(&miss);
        assert!(!registry.dispatch_get("temp"));
    }

    #[test]
    fn test_registration_past_capacity_is_inert() {
        let seen = Cell::new(0u32);
        let decline = |_: &str| {
            seen.set(seen.get() + 1);
            false
        };
        let overflow = |_: &str| {
            seen.set(seen.get() + 100);
            true
        };

        let mut registry: HandlerRegistry = HandlerRegistry::new();
        for _ in 0..MAX_HANDLERS {
            assert!(registry.on_get(&decline));
        }
        // Sixth registration is dropped without error
        assert!(!registry.on_get(&overflow));

        assert!(!registry.dispatch_get("temp"));
        // Only the first five were ever consulted
        assert_eq!(seen.get(), MAX_HANDLERS as u32);
    }

    #[test]
    fn test_custom_capacity() {
        let yes = |_: &str| true;
        let mut registry: HandlerRegistry<2> = HandlerRegistry::new();
        assert!(registry.on_get(&yes));
        assert!(registry.on_get(&yes));
        assert!(!registry.on_get(&yes));
        assert!(registry.dispatch_get("temp"));
    }

    #[test]
    fn test_key_and_payload_reach_handler() {
        let matched = Cell::new(false);
        let handler = |key: &str, payload: &[u8]| {
            matched.set(key == "blob" && payload == &[0x01, 0x02, 0x03][..]);
            true
        };
        let mut registry: HandlerRegistry = HandlerRegistry::new();
        registry.on_byte_stream(&handler);
        assert!(registry.dispatch_byte_stream("blob", &[0x01, 0x02, 0x03]));
        assert!(matched.get());
    }
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
use std::sync::Arc;

use switchtag_host::{
    CollectingLogger, EvalContext, HtmlEntityDecoder, Processor, SourceResolver,
};

fn processor(resolver: SourceResolver) -> Processor {
    Processor::new(Arc::new(resolver))
}

#[test]
fn resolves_prefixed_variables_through_their_sources() {
    let template = "{exp:switch variable=\"get:section\"}\
                    {case value=\"news\"}Newsroom{/case}\
                    {case value=\"about\"}About us{/case}\
                    {/exp:switch}";
    let p = processor(SourceResolver::new().with_get_param("section", "about"));
    assert_eq!(p.process(template), "About us");
}

#[test]
fn sibling_invocations_evaluate_independently() {
    let template = "{exp:switch variable=\"stash:a\"}{case value=\"1\"}A{/case}{/exp:switch}\
                    -\
                    {exp:switch variable=\"stash:b\"}{case value=\"2\"}B{/case}{/exp:switch}";
    let p = processor(SourceResolver::new().with_stash("a", "1").with_stash("b", "2"));
    assert_eq!(p.process(template), "A-B");
}

#[test]
fn nested_block_is_evaluated_on_the_second_pass() {
    let template = "{exp:switch variable=\"outer\"}\
                    {case value=\"a\"}\
                    {switch variable=\"global:inner\"}\
                    {case value=\"x\"}deep{/case}\
                    {/switch}\
                    {/case}\
                    {/exp:switch}";
    let resolver = SourceResolver::new()
        .with_global("outer", "a")
        .with_global("inner", "x");
    let p = processor(resolver);

    let first_pass = p.process(template);
    assert_eq!(
        first_pass,
        "{exp:switch variable=\"global:inner\"}\
         {case value=\"x\"}deep{/case}\
         {/exp:switch}"
    );
    assert_eq!(p.process(&first_pass), "deep");
    assert_eq!(p.process_to_fixpoint(template), "deep");
}

#[test]
fn entity_encoded_alternatives_decode_before_matching() {
    // A pipe inside an alternative must be written as &#124; so it is
    // not taken for an alternative separator.
    let template = "{exp:switch variable=\"v\"}\
                    {case value=\"a&#124;b\"}piped{/case}\
                    {/exp:switch}";
    let p = processor(SourceResolver::new().with_global("v", "a|b"));
    assert_eq!(p.process(template), "piped");
}

#[test]
fn entity_encoded_pattern_braces_decode_before_compiling() {
    let template = "{exp:switch variable=\"v\"}\
                    {case value=\"#^&#123;\\d+&#125;$#\"}braced{/case}\
                    {/exp:switch}";
    let p = processor(SourceResolver::new().with_global("v", "{42}"));
    assert_eq!(p.process(template), "braced");
}

#[test]
fn no_results_sentinel_is_normalized_for_host_conditionals() {
    let template = "{exp:switch variable=\"v\"}\
                    {case value=\"missing\" default=\"yes\"}\
                    {if switchtag_no_results}nothing found{/if}\
                    {/case}\
                    {/exp:switch}";
    let p = processor(SourceResolver::new().with_global("v", "unmatched"));
    assert_eq!(p.process(template), "{if no_results}nothing found{/if}");
}

#[test]
fn debug_mode_routes_diagnostics_to_the_installed_logger() {
    let logger = Arc::new(CollectingLogger::new());
    let ctx = EvalContext::new()
        .with_decoder(Arc::new(HtmlEntityDecoder))
        .with_logger(logger.clone());
    let template = "{exp:switch variable=\"v\" debug=\"yes\"}\
                    {case value=\"a\"}hit{/case}\
                    {/exp:switch}";
    let p = processor(SourceResolver::new().with_global("v", "a")).with_context(ctx);

    assert_eq!(p.process(template), "hit");
    let messages = logger.messages();
    assert!(messages
        .iter()
        .any(|m| m.contains("evaluating variable 'a'")));
    assert!(messages
        .iter()
        .any(|m| m.contains("string match: case 'a' matched variable 'a'")));
}

#[test]
fn without_debug_nothing_is_logged() {
    let logger = Arc::new(CollectingLogger::new());
    let ctx = EvalContext::new().with_logger(logger.clone());
    let template = "{exp:switch variable=\"v\"}{case value=\"a\"}hit{/case}{/exp:switch}";
    let p = processor(SourceResolver::new().with_global("v", "a")).with_context(ctx);

    assert_eq!(p.process(template), "hit");
    assert!(logger.messages().is_empty());
}

#[test]
fn fixpoint_terminates_on_templates_without_invocations() {
    let p = processor(SourceResolver::new());
    assert_eq!(p.process_to_fixpoint("plain text"), "plain text");
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
use std::sync::Arc;

use switchtag_host::{Processor, SourceResolver};

fn main() {
    let resolver = SourceResolver::new()
        .with_get_param("section", "news")
        .with_global("layout", "wide");

    let template = "\
        {exp:switch variable=\"get:section\"}\n\
        {case value=\"news|press\"}Newsroom{/case}\n\
        {case value=\"#^doc(s)?$#\"}Documentation{/case}\n\
        {case default=\"yes\"}Home{/case}\n\
        {/exp:switch}\n";

    let processor = Processor::new(Arc::new(resolver));
    let output = processor.process_to_fixpoint(template);

    println!("{output}");
    assert_eq!(output.trim(), "Newsroom");
}

#![no_main]

use libfuzzer_sys::fuzz_target;
use patricia_trie::Node;

// Arbitrary bytes either fail to decode or decode to a node whose encoding decodes back to
// the same node.
fuzz_target!(|data: &[u8]| {
    let Ok(node) = Node::decode(data) else {
        return;
    };
    let encoded = node.encode();
    assert_eq!(Node::decode(&encoded).expect("re-decoding an encoded node"), node);
    assert_eq!(encoded.as_ref(), data, "accepted a non-canonical node encoding");
});

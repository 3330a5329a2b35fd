//! Prompts sent to the generative AI service

/// Search-grounded completion asking for the product JSON shape as raw text.
///
/// Schema enforcement cannot be combined with search grounding, so the shape
/// is described in the prompt and checked by the sanitizer afterwards.
pub fn search_prompt(query: &str) -> String {
    format!(
        r#"I am looking for the cheapest specific buying options for: "{query}".

Perform a Google Search to find REAL, AVAILABLE products.

Output the result STRICTLY as a raw JSON object (no markdown, no backticks, no code blocks).
The JSON must follow this exact structure:
{{
  "summary": "A brief 2-sentence analysis of the price range found.",
  "products": [
    {{
      "title": "Product Name",
      "price": "$Price",
      "storeName": "Store Name",
      "url": "Direct Product URL",
      "imageUrl": "Direct Image URL (optional)",
      "description": "Short description"
    }}
  ]
}}

Rules for "url":
- MUST be a direct product page (e.g. ends in .html, contains /dp/, /product/, /item/).
- DO NOT return generic homepages (like www.amazon.com or www.ebay.com).
- DO NOT return search result pages.

Rules for "imageUrl":
- Try to find a direct image URL for the product from the search results.
- If you cannot find a specific image URL, leave it empty.

Rules for "price":
- Specific price string (e.g. "$25.99").

Ensure valid JSON syntax."#
    )
}

/// Square product-photo style preview of the query
pub fn image_prompt(query: &str) -> String {
    format!(
        "Generate a high-quality, clean commercial product photography image of: {query}. \
         White background. Isolate the object."
    )
}

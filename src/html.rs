//! Static documentation page: the OpenAPI document inlined into a Swagger UI shell.

use crate::error::{Error, Result};
use crate::openapi::OpenApi;

const SWAGGER_UI_DIST: &str = "https://unpkg.com/swagger-ui-dist@4.4.1";

pub fn render(document: &OpenApi) -> Result<String> {
    let spec = serde_json::to_string(document)
        .map_err(|e| Error::serialize("documentation page", e))?;
    // keep a literal `</script>` inside a string from closing the tag
    let spec = spec.replace("</", "<\\/");
    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <meta name="description" content="SwaggerUI" />
  <title>{title}</title>
  <link rel="stylesheet" href="{dist}/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="{dist}/swagger-ui-bundle.js" crossorigin></script>
  <script src="{dist}/swagger-ui-standalone-preset.js" crossorigin></script>
  <script>
    const spec = {spec};

    window.onload = () => {{
      window.ui = SwaggerUIBundle({{
        spec,
        dom_id: '#swagger-ui',
      }});
    }};
  </script>
</body>
</html>
"#,
        title = escape_text(&document.info.title),
        dist = SWAGGER_UI_DIST,
        spec = spec,
    ))
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

//! Vue 2 story template.

use super::StoryTemplate;
use crate::module::Import;

/// Options API template: props live in `data`, an immediate `watch` on args
/// keeps them in sync and routes through `this.$router`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Vue2Template;

impl StoryTemplate for Vue2Template {
    fn id(&self) -> &'static str {
        "vue2"
    }

    fn name(&self) -> &'static str {
        "Vue 2"
    }

    fn framework_imports(&self) -> Vec<Import> {
        Vec::new()
    }

    fn template_class(&self, component: &str) -> String {
        format!(
            r#"class Template {{
  constructor(env) {{
    this.env = env;
    this.render = this.render.bind(this);
  }}

  render(args) {{
    applyEnvironment(this.env || defaultEnvironment(), args);
    return {{
      components: {{ {component} }},
      data: () => ({{
        props: buildData(args, 'props'),
      }}),
      watch: {{
        args: {{
          immediate: true,
          handler(newArgs = {{}}) {{
            if (newArgs.url) {{
              this.$router.replace(newArgs.url);
            }}
            Object.assign(this.props, buildData(newArgs, 'props'));
          }},
        }},
      }},
      template: '<{component} v-bind="props" />',
    }};
  }}
}}"#,
            component = component
        )
    }
}

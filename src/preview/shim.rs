//! Console-capture shim injected into every composed document.
//!
//! Wraps the four console entry points plus uncaught errors and
//! unhandled rejections, posts `{type:"console", level, args}` to the
//! parent context, then forwards to the original console so in-frame
//! debugging still works. Must run before any user script.

pub const CONSOLE_SHIM: &str = r#"<script>
(function() {
  const originalConsole = {
    log: console.log,
    error: console.error,
    warn: console.warn,
    info: console.info
  };

  function sendToParent(level, args) {
    try {
      const serializedArgs = args.map(arg => {
        if (typeof arg === 'object' && arg !== null) {
          try {
            return JSON.stringify(arg, null, 2);
          } catch (e) {
            return '[Object]';
          }
        }
        return String(arg);
      });

      window.parent.postMessage({
        type: 'console',
        level: level,
        args: serializedArgs
      }, '*');
    } catch (e) {
      // Silent fail
    }
  }

  console.log = function(...args) {
    sendToParent('log', args);
    originalConsole.log.apply(console, args);
  };

  console.error = function(...args) {
    sendToParent('error', args);
    originalConsole.error.apply(console, args);
  };

  console.warn = function(...args) {
    sendToParent('warn', args);
    originalConsole.warn.apply(console, args);
  };

  console.info = function(...args) {
    sendToParent('info', args);
    originalConsole.info.apply(console, args);
  };

  window.addEventListener('error', function(e) {
    sendToParent('error', [e.message + ' at ' + (e.filename || 'unknown') + ':' + (e.lineno || 'unknown')]);
  });

  window.addEventListener('unhandledrejection', function(e) {
    sendToParent('error', ['Unhandled Promise Rejection:', e.reason]);
  });
})();
</script>
"#;

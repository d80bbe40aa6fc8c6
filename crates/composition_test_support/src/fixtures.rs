//! Backend documents used across parser tests.

/// Exercises every part of the vocabulary in one page.
pub const INTEGRATED_HTML: &str = r#"<html>
  <head>
    <link uic-remove rel="stylesheet" type="text/css" href="testing.css"/>
    <link rel="stylesheet" type="text/css" href="special.css"/>
    <script type="text/uic-meta">
      {
       "foo": "bar",
       "boo": "bazz",
       "categories": ["animal", "human"]
      }
    </script>
    <script uic-remove>
      va xzw = "some test code""
    </script>
    <script src="myScript.js"></script>
  </head>
  <body>
    <ul uic-remove>
      <!-- A Navigation for testing -->
    </ul>
    <uic-fragment name="headline">
      <h1>This is a headline</h1>
    </uic-fragment>
    <uic-fragment name="content">
      Bli Bla blub
      <uic-fetch src="example.com/foo" timeout="100" required="true"/>
      <uic-include src="example.com/foo#content" required="true"/>
      <uic-include src="example.com/optional#content">
        <p>some alternative text</p>
      </uic-include>
      <div uic-remove>
         Some element for testing
      </div>
      <hr/>
      Bli Bla blub
    </uic-fragment>
    <uic-tail>
      <!-- some script tags to insert at the end -->
      <script src="foo.js"></script>
      <script src="bar.js"></script>
      <script uic-remove src="demo.js"></script>
    </uic-tail>
  </body>
</html>
"#;

pub const INTEGRATED_EXPECTED_HEAD: &str = r#"
    <link rel="stylesheet" type="text/css" href="special.css"/>
    <script src="myScript.js"></script>"#;

pub const INTEGRATED_EXPECTED_HEADLINE: &str = "<h1>This is a headline</h1>";

pub const INTEGRATED_EXPECTED_CONTENT: &str = r#"
      Bli Bla blub
      §[> example.com/foo#content]§
      §[#> example.com/optional#content]§
         <p>some alternative text</p>
      §[/example.com/optional#content]§
      <hr/>
      Bli Bla blub"#;

pub const INTEGRATED_EXPECTED_TAIL: &str = r#"
      <!-- some script tags to insert at the end -->
      <script src="foo.js"></script>
      <script src="bar.js"></script>"#;

/// A generated page whose head stacks several services' heads, with repeated
/// titles and meta tags.
pub const PRODUCT_UI_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>navigationservice</title>

    <!-- START Include legacy styles - emulate integration -->

    <!-- END Include legacy styles -->

    <link rel="stylesheet" href="/navigationservice/stylesheets/main-ffc9b54a22.css">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">

    <script>
        SCRIPTS = ['/navigationservice/javascripts/vendor/jquery-8101d596b2.min.js'];
        isLegacy = function() {
            return typeof Object.assign === 'function' ? false : true;
        };

        loadScript = function(script, legacyOnly) {
            for(var i=0; i < SCRIPTS.length; i++) if(SCRIPTS[i] === script) return false;
            if((legacyOnly && isLegacy()) || (!legacyOnly)) {
                SCRIPTS.push(script);
            }
        };
    </script>

    <!-- fonts.com - Async Font Loading -->
    <script type="text/javascript">
        (function() {
            var fontsComJS = document.createElement('script');
            fontsComJS.async = true;
            var head = document.getElementsByTagName("head")[0];
            head.appendChild(fontsComJS);
        })();
    </script><meta charset="utf-8">
    <!--
        This website is powered by TYPO3 - inspiring people to share!
    -->

    <base href="/">

    <meta name="generator" content="TYPO3 CMS">
    <meta name="content-language" content="de">

    <script src="typo3temp/compressor/merged-f6a1f7cc0a.js?1476243484" type="text/javascript"></script>

    <meta http-equiv="X-UA-Compatible" content="IE=edge">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <link rel="shortcut icon" href="favicon.ico" type="image/ico" />

    <!-- picturefill:start -->
    <script src="/rebrush/assets/typo/javascripts/picturefill-f350acdff4.min.js" async></script>
    <!-- picturefill:end --><link href="http://www.example.de/navigation/" rel="canonical"><meta charset="utf-8">
    <title>Suchergebnis | Baumarkt</title>

    <meta name="viewport" content="width=device-width, initial-scale=3.0">
    <meta name="robots" content="noindex">
</head>
<body data-ajax-domain="192.168.1.13:33351">
</body>
</html>"#;

/// A head as it comes out of the parser, before merging with another page.
pub const NAVIGATION_HEAD: &str = r#"<meta charset="utf-8">
	<title>navigationservice</title>



	<!-- START Include legacy styles - emulate integration -->

	<!-- END Include legacy styles -->

	<link rel="stylesheet" href="/navigationservice/stylesheets/main-93174ed18d.css">
	<meta name="viewport" content="width=device-width, initial-scale=1.0">
	<meta name="blub" content="width=device-width, initial-scale=1.0">
	<script>
	loadScript = function(script, legacyOnly) {
		for(var i=0; i < SCRIPTS.length; i++) if(SCRIPTS[i] === script) return false;
	};
	</script>

	<!-- fonts.com - Async Font Loading -->"#;
